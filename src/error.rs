//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 클라이언트가 직접 마주치는 에러는 두 가지뿐입니다:
//! - `NotFound` → 404 (본문 없음)
//! - `InvalidInput` → 400 (필드별 에러 맵 `{ "title": ["..."] }`)

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (200, 404, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error;

use crate::validation::FieldErrors;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 ID의 행이 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 필드 검증 실패 (HTTP 400)
    /// 필수 필드 누락, 타입 불일치, 존재하지 않는 테마 ID 참조 등이 여기에 해당합니다.
    /// #[from]: `FieldErrors`에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] FieldErrors),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    /// DB 파일의 상위 디렉토리를 만들 때 발생할 수 있습니다.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, IO)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            // 404는 본문 없이 상태 코드만 반환합니다.
            AppError::NotFound => return StatusCode::NOT_FOUND.into_response(),

            // 검증 에러는 필드 이름을 키로 하는 맵을 그대로 본문으로 씁니다.
            // 예: { "topic": ["Invalid pk \"9\" - object does not exist."] }
            AppError::InvalidInput(errors) => {
                return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
            }

            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred",
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "An IO error occurred",
                )
            }
        };

        // 결과: { "error": { "code": "database_error", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let (status, body) = render(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn invalid_input_is_the_bare_field_map() {
        let (status, body) = render(FieldErrors::required("title").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"title":["This field is required."]}"#);
    }

    #[tokio::test]
    async fn io_errors_hide_details() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/path");
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("io_error"));
        assert!(!body.contains("/secret/path"));
    }
}
