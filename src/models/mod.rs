//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `topic`: 학습 테마(Topic)
//! - `record`: 학습 기록(LearningRecord)
//!
//! `pub use X::*;`로 하위 모듈의 항목을 재공개하여
//! `crate::models::Topic`처럼 짧게 접근할 수 있게 합니다.

pub mod record;
pub mod topic;

pub use record::*;
pub use topic::*;
