//! # 학습 기록 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/records/`      → 기록 목록 (날짜 내림차순)
//! - `POST   /api/records/`      → 새 기록 생성
//! - `GET    /api/records/{id}/` → 기록 하나 조회
//! - `PUT    /api/records/{id}/` → 기록 전체 수정 (`topic` 필수)
//! - `PATCH  /api/records/{id}/` → 기록 부분 수정
//! - `DELETE /api/records/{id}/` → 기록 삭제
//!
//! 테마 핸들러와 모양은 같지만, 본문 검증에 DB 조회(테마 존재 확인)가
//! 들어가므로 `decode_record`에 풀을 넘겨줍니다.

use crate::{
    db,
    error::AppError,
    middleware::JsonBody,
    models::*,
    routes::{parse_id, AppState},
    validation::{decode_record, DecodeMode},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<LearningRecord>>, AppError> {
    let records = db::list_records(&state.pool).await?;
    Ok(Json(records))
}

/// `POST /records/` + `{ "topic": 1, "date"?, "minutes"?, "planned_minutes"?, "memo"? }`
///
/// 생략한 필드는 기본값(오늘 날짜, 0분, 메모 없음)으로 채워집니다.
pub async fn create_record(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<LearningRecord>), AppError> {
    let changes = decode_record(&state.pool, &body, DecodeMode::Create).await?;
    let new = NewLearningRecord::try_from(changes)?;
    let record = db::create_record(&state.pool, &new).await?;

    tracing::info!(record_id = record.id, topic_id = record.topic, "Created learning record");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LearningRecord>, AppError> {
    let id = parse_id(&id)?;
    let record = db::get_record(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(record))
}

pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<LearningRecord>, AppError> {
    save_record(&state, &id, &body, DecodeMode::Partial).await.map(Json)
}

pub async fn replace_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<LearningRecord>, AppError> {
    save_record(&state, &id, &body, DecodeMode::Replace).await.map(Json)
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    if !db::delete_record(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(record_id = id, "Deleted learning record");
    Ok(StatusCode::NO_CONTENT)
}

async fn save_record(
    state: &AppState,
    raw_id: &str,
    body: &Value,
    mode: DecodeMode,
) -> Result<LearningRecord, AppError> {
    let id = parse_id(raw_id)?;
    let mut record = db::get_record(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    record.apply(decode_record(&state.pool, body, mode).await?);

    let record = db::update_record(&state.pool, &record)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(record_id = record.id, "Updated learning record");
    Ok(record)
}
