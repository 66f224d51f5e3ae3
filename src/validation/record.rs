//! # 학습 기록(LearningRecord)의 필드 스키마
//!
//! 테마 스키마와 달리 `topic` 필드가 다른 테이블의 행을 가리키므로,
//! 형식 검증이 끝난 뒤 DB에서 해당 테마가 실제로 있는지 한 번 더 확인합니다.

use serde_json::Value;
use sqlx::SqlitePool;

use super::{decode, DecodeMode, FieldKind, FieldSpec, FieldValue};
use crate::{db, error::AppError, models::*};

fn default_date() -> FieldValue {
    FieldValue::Date(today())
}

fn default_minutes() -> FieldValue {
    FieldValue::Integer(0)
}

fn default_memo() -> FieldValue {
    FieldValue::Null
}

pub const RECORD_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        name: "topic",
        kind: FieldKind::PrimaryKey,
        required: true,
        nullable: false,
        default: None,
    },
    FieldSpec {
        name: "date",
        kind: FieldKind::Date,
        required: false,
        nullable: false,
        default: Some(default_date),
    },
    // minutes / planned_minutes: 음수도 그대로 받습니다 (보정 기록 용도로 쓰일 수 있음)
    FieldSpec {
        name: "minutes",
        kind: FieldKind::Integer,
        required: false,
        nullable: false,
        default: Some(default_minutes),
    },
    FieldSpec {
        name: "planned_minutes",
        kind: FieldKind::Integer,
        required: false,
        nullable: false,
        default: Some(default_minutes),
    },
    FieldSpec {
        name: "memo",
        kind: FieldKind::Text {
            max_length: None,
            allow_blank: true,
        },
        required: false,
        nullable: true,
        default: Some(default_memo),
    },
];

/// 존재하지 않는 테마 ID를 참조했을 때의 에러 메시지
pub fn missing_topic_message(topic_id: i64) -> String {
    format!("Invalid pk \"{topic_id}\" - object does not exist.")
}

/// 요청 본문을 학습 기록 변경 사항으로 변환합니다.
///
/// 형식 에러와 "없는 테마" 에러를 한 응답에 함께 담기 위해,
/// `finish()` 전에 테마 존재 여부를 확인해 에러 맵에 덧붙입니다.
pub async fn decode_record(
    pool: &SqlitePool,
    body: &Value,
    mode: DecodeMode,
) -> Result<LearningRecordChanges, AppError> {
    let mut decoded = decode(RECORD_SCHEMA, body, mode);

    if let Some(topic_id) = decoded.fields.primary_key("topic") {
        if !db::topic_exists(pool, topic_id).await? {
            decoded.errors.add("topic", missing_topic_message(topic_id));
        }
    }

    let mut fields = decoded.finish()?;

    Ok(LearningRecordChanges {
        topic: fields.take_primary_key("topic"),
        date: fields.take_date("date"),
        minutes: fields.take_integer("minutes"),
        planned_minutes: fields.take_integer("planned_minutes"),
        memo: fields.take_nullable_text("memo"),
    })
}
