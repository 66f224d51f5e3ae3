//! 학습 테마(Topic)의 필드 스키마

use serde_json::Value;

use super::{decode, DecodeMode, FieldErrors, FieldKind, FieldSpec};
use crate::models::TopicChanges;

/// 테마 제목의 최대 길이(문자 수)
pub const TITLE_MAX_LENGTH: usize = 200;

pub const TOPIC_SCHEMA: &[FieldSpec] = &[FieldSpec {
    name: "title",
    kind: FieldKind::Text {
        max_length: Some(TITLE_MAX_LENGTH),
        allow_blank: false,
    },
    required: true,
    nullable: false,
    default: None,
}];

/// 요청 본문을 테마 변경 사항으로 변환합니다.
///
/// 테마에는 다른 테이블을 참조하는 필드가 없으므로 DB 없이 검증이 끝납니다.
pub fn decode_topic(body: &Value, mode: DecodeMode) -> Result<TopicChanges, FieldErrors> {
    let mut fields = decode(TOPIC_SCHEMA, body, mode).finish()?;

    Ok(TopicChanges {
        title: fields.take_text("title"),
    })
}
