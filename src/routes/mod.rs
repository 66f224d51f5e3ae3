//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 URL 라우팅 표를 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `topics`: 학습 테마 CRUD 핸들러
//! - `records`: 학습 기록 CRUD 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)
//!
//! ## 라우팅 표 (`API_PREFIX` 기본값 `/api` 아래)
//! | 경로 | 메서드 |
//! |------|--------|
//! | `/topics/` | GET, POST |
//! | `/topics/{id}/` | GET, PUT, PATCH, DELETE |
//! | `/records/` | GET, POST |
//! | `/records/{id}/` | GET, PUT, PATCH, DELETE |
//! | `/health` | GET |

pub mod health;
pub mod records;
pub mod topics;

use std::path::Path;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{config::Config, error::AppError};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 쓰므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// URL의 `{id}` 조각을 정수 ID로 바꿉니다.
///
/// 숫자로만 이루어진 조각만 리소스 경로로 인정하므로,
/// `/topics/abc/`나 `/topics/-1/`은 없는 ID와 똑같이 404가 됩니다.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    raw.parse().map_err(|_| AppError::NotFound)
}

/// 리소스 엔드포인트만 담은 라우터 (접두사, 미들웨어 없음)
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/topics/",
            get(topics::list_topics).post(topics::create_topic),
        )
        .route(
            "/topics/{id}/",
            get(topics::get_topic)
                .put(topics::replace_topic)
                .patch(topics::update_topic)
                .delete(topics::delete_topic),
        )
        .route(
            "/records/",
            get(records::list_records).post(records::create_record),
        )
        .route(
            "/records/{id}/",
            get(records::get_record)
                .put(records::replace_record)
                .patch(records::update_record)
                .delete(records::delete_record),
        )
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// 접두사, CORS, 요청 로깅, (있다면) 프론트엔드 정적 파일까지 붙인 전체 앱
pub fn build_app(state: AppState, config: &Config) -> Router {
    let api_routes = api_router(state);

    let router = if config.api_prefix.is_empty() {
        api_routes
    } else {
        // 예: /topics/ → /api/topics/
        Router::new().nest(&config.api_prefix, api_routes)
    };

    // 프론트엔드는 개발 중 다른 origin(dev 서버)에서 API를 호출하므로 모두 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let frontend_dist = Path::new(&config.frontend_dist);
    let router = if frontend_dist.is_dir() {
        tracing::info!("Serving frontend static files from {}", config.frontend_dist);

        // SPA이므로 찾을 수 없는 경로는 index.html로 돌려보냅니다.
        let serve_dir = ServeDir::new(frontend_dist)
            .not_found_service(ServeFile::new(frontend_dist.join("index.html")));
        router.fallback_service(serve_dir)
    } else {
        tracing::warn!(
            "Frontend dist directory {} not found, serving API only",
            config.frontend_dist
        );
        router
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
