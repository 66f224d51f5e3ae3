//! # 학습 테마 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/topics/ | `list_topics` | 전체 테마 목록 |
//! | POST | /api/topics/ | `create_topic` | 새 테마 생성 |
//! | GET | /api/topics/{id}/ | `get_topic` | 테마 하나 조회 |
//! | PUT | /api/topics/{id}/ | `replace_topic` | 테마 전체 수정 |
//! | PATCH | /api/topics/{id}/ | `update_topic` | 테마 부분 수정 |
//! | DELETE | /api/topics/{id}/ | `delete_topic` | 테마 삭제 (학습 기록도 함께 삭제) |

use crate::{
    db,
    error::AppError,
    middleware::JsonBody,
    models::*,
    routes::{parse_id, AppState},
    validation::{decode_topic, DecodeMode},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// `GET /topics/` → `[{ "id": 1, "title": "Math" }, ...]`
pub async fn list_topics(State(state): State<AppState>) -> Result<Json<Vec<Topic>>, AppError> {
    let topics = db::list_topics(&state.pool).await?;
    Ok(Json(topics))
}

/// `POST /topics/` + `{ "title": "..." }` → `201 Created`
pub async fn create_topic(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Topic>), AppError> {
    let new = NewTopic::try_from(decode_topic(&body, DecodeMode::Create)?)?;
    let topic = db::create_topic(&state.pool, &new).await?;

    tracing::info!(topic_id = topic.id, "Created topic");
    Ok((StatusCode::CREATED, Json(topic)))
}

/// `GET /topics/{id}/`
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Topic>, AppError> {
    let id = parse_id(&id)?;
    let topic = db::get_topic(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(topic))
}

/// `PATCH /topics/{id}/` — 본문에 있는 필드만 수정합니다.
pub async fn update_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Topic>, AppError> {
    save_topic(&state, &id, &body, DecodeMode::Partial).await.map(Json)
}

/// `PUT /topics/{id}/` — `title`이 반드시 있어야 합니다.
pub async fn replace_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Topic>, AppError> {
    save_topic(&state, &id, &body, DecodeMode::Replace).await.map(Json)
}

/// `DELETE /topics/{id}/` → `204 No Content`
///
/// 이 테마의 학습 기록은 DB의 `ON DELETE CASCADE`로 함께 삭제됩니다.
pub async fn delete_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    if !db::delete_topic(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(topic_id = id, "Deleted topic and its learning records");
    Ok(StatusCode::NO_CONTENT)
}

/// 조회(404) → 검증(400) → 병합 → 저장 순서로 처리합니다.
async fn save_topic(
    state: &AppState,
    raw_id: &str,
    body: &serde_json::Value,
    mode: DecodeMode,
) -> Result<Topic, AppError> {
    let id = parse_id(raw_id)?;
    let mut topic = db::get_topic(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    topic.apply(decode_topic(body, mode)?);

    let topic = db::update_topic(&state.pool, &topic)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(topic_id = topic.id, "Updated topic");
    Ok(topic)
}
