//! # Study Tracker 백엔드 라이브러리
//!
//! 학습 테마(Topic)와 학습 기록(LearningRecord) 두 리소스를
//! REST/JSON으로 노출하는 서버의 구성 요소들입니다.
//! 실행 파일(`main.rs`)과 통합 테스트(`tests/`)가 함께 사용합니다.
//!
//! 요청 흐름:
//! 라우팅 표(`routes`) → 핸들러 → 본문 검증(`validation`) → DB(`db`) → JSON 응답

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod validation;
