//! # 학습 기록 데이터베이스 쿼리 모듈
//!
//! `learning_records` 테이블의 CRUD 함수들입니다.
//! 날짜는 "YYYY-MM-DD" TEXT로 저장되므로 문자열 정렬이 곧 날짜 정렬입니다.

use crate::error::AppError;
use crate::models::*;
use crate::validation::{missing_topic_message, FieldErrors};
use sqlx::SqlitePool;

const RECORD_COLUMNS: &str = "id, topic_id, date, minutes, planned_minutes, memo";

/// 모든 학습 기록을 최신 날짜순으로 조회합니다.
///
/// 같은 날짜끼리는 먼저 만든 기록이 앞에 옵니다 (id 오름차순).
pub async fn list_records(pool: &SqlitePool) -> Result<Vec<LearningRecord>, AppError> {
    let records = sqlx::query_as::<_, LearningRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM learning_records ORDER BY date DESC, id ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn get_record(pool: &SqlitePool, id: i64) -> Result<Option<LearningRecord>, AppError> {
    let record = sqlx::query_as::<_, LearningRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM learning_records WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// 새 학습 기록을 생성합니다.
///
/// 테마 존재 여부는 검증 단계에서 이미 확인했지만, 검증과 INSERT 사이에
/// 테마가 삭제될 수 있습니다. 그 경우 DB의 외래키 제약이 INSERT를 막고,
/// 이를 500이 아닌 `topic` 필드 검증 에러로 돌려줍니다.
pub async fn create_record(
    pool: &SqlitePool,
    new: &NewLearningRecord,
) -> Result<LearningRecord, AppError> {
    let record = sqlx::query_as::<_, LearningRecord>(&format!(
        r#"
        INSERT INTO learning_records (topic_id, date, minutes, planned_minutes, memo)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {RECORD_COLUMNS}
        "#
    ))
    .bind(new.topic)
    .bind(new.date)
    .bind(new.minutes)
    .bind(new.planned_minutes)
    .bind(&new.memo) // None이면 SQL NULL
    .fetch_one(pool)
    .await
    .map_err(|e| topic_violation(e, new.topic))?;

    Ok(record)
}

/// 병합이 끝난 학습 기록 전체를 저장합니다.
///
/// - `Ok(Some(..))`: 저장 성공
/// - `Ok(None)`: 그 사이에 기록(또는 소속 테마)이 삭제되어 갱신된 행이 없음
pub async fn update_record(
    pool: &SqlitePool,
    record: &LearningRecord,
) -> Result<Option<LearningRecord>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE learning_records
        SET topic_id = ?, date = ?, minutes = ?, planned_minutes = ?, memo = ?
        WHERE id = ?
        "#,
    )
    .bind(record.topic)
    .bind(record.date)
    .bind(record.minutes)
    .bind(record.planned_minutes)
    .bind(&record.memo)
    .bind(record.id)
    .execute(pool)
    .await
    .map_err(|e| topic_violation(e, record.topic))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_record(pool, record.id).await
}

pub async fn delete_record(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM learning_records WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 외래키 위반만 `topic` 필드 에러로 바꾸고, 나머지 DB 에러는 그대로 둡니다.
fn topic_violation(err: sqlx::Error, topic_id: i64) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::InvalidInput(FieldErrors::single("topic", missing_topic_message(topic_id)))
        }
        _ => AppError::Database(err),
    }
}
