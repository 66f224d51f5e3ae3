//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 검증 계층(validation/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `pool`: 연결 풀 생성과 마이그레이션
//! - `topics`: 학습 테마 CRUD 쿼리
//! - `records`: 학습 기록 CRUD 쿼리

pub mod pool;
pub mod records;
pub mod topics;

// `crate::db::list_topics`처럼 바로 접근할 수 있게 재공개합니다.
pub use pool::*;
pub use records::*;
pub use topics::*;
