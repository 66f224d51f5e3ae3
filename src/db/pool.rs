//! # SQLite 연결 풀 생성과 마이그레이션

use std::str::FromStr;

use sqlx::{
    migrate::{MigrateError, Migrator},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::error::AppError;

/// `migrations/` 폴더의 SQL 파일들을 컴파일 타임에 바이너리에 포함합니다.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// DB URL로 연결 풀을 만듭니다.
///
/// - `create_if_missing(true)`: DB 파일이 없으면 새로 만듭니다.
/// - `foreign_keys(true)`: 연결마다 `PRAGMA foreign_keys = ON`을 실행합니다.
///   SQLite는 이 설정이 꺼져 있으면 `ON DELETE CASCADE`를 무시하므로,
///   테마 삭제 시 학습 기록이 함께 지워지려면 반드시 켜져 있어야 합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // "sqlite:data/study_tracker.db" → data/ 디렉토리가 없으면 먼저 만듭니다.
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            tracing::info!("Created database directory: {}", parent.display());
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// 메모리 DB 연결 풀 (테스트용)
///
/// 메모리 DB는 연결마다 별개의 DB가 되므로 연결을 1개로 고정하고,
/// 유휴 타임아웃으로 연결이 닫혀 데이터가 사라지지 않게 합니다.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// 아직 실행되지 않은 마이그레이션만 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
