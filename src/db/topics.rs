//! # 학습 테마 데이터베이스 쿼리 모듈
//!
//! `topics` 테이블의 CRUD 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 모든 테마를 생성 순서(id 오름차순)로 조회합니다.
pub async fn list_topics(pool: &SqlitePool) -> Result<Vec<Topic>, AppError> {
    let topics = sqlx::query_as::<_, Topic>("SELECT id, title FROM topics ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(topics)
}

/// ID로 테마 하나를 조회합니다.
///
/// `fetch_optional`은 결과가 0행이면 None, 1행이면 Some(Topic)을 반환합니다.
pub async fn get_topic(pool: &SqlitePool, id: i64) -> Result<Option<Topic>, AppError> {
    let topic = sqlx::query_as::<_, Topic>("SELECT id, title FROM topics WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(topic)
}

/// 테마가 존재하는지만 확인합니다 (학습 기록의 `topic` 검증용).
pub async fn topic_exists(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM topics WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// 새 테마를 생성하고 생성된 테마를 반환합니다.
///
/// `RETURNING`으로 INSERT와 조회를 한 번에 처리합니다.
/// id는 `AUTOINCREMENT`라서 삭제된 번호가 다시 쓰이지 않습니다.
pub async fn create_topic(pool: &SqlitePool, new: &NewTopic) -> Result<Topic, AppError> {
    let topic = sqlx::query_as::<_, Topic>(
        "INSERT INTO topics (title) VALUES (?) RETURNING id, title",
    )
    .bind(&new.title)
    .fetch_one(pool)
    .await?;

    Ok(topic)
}

/// 병합이 끝난 테마를 저장합니다.
///
/// ## 반환값
/// - `Ok(Some(Topic))`: 저장 성공
/// - `Ok(None)`: 그 사이에 테마가 삭제되어 갱신된 행이 없음
pub async fn update_topic(pool: &SqlitePool, topic: &Topic) -> Result<Option<Topic>, AppError> {
    let result = sqlx::query("UPDATE topics SET title = ? WHERE id = ?")
        .bind(&topic.title)
        .bind(topic.id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_topic(pool, topic.id).await
}

/// ID로 테마를 삭제합니다.
///
/// `learning_records.topic_id`에 `ON DELETE CASCADE`가 걸려 있으므로,
/// 이 테마를 참조하는 학습 기록도 같은 문장 안에서 함께 삭제됩니다.
///
/// ## 반환값
/// - `true`: 삭제 성공
/// - `false`: 해당 ID의 테마가 없음
pub async fn delete_topic(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM topics WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
