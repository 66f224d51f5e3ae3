//! # 학습 기록 모델 정의
//!
//! 학습 기록은 "어느 테마를, 언제, 계획 대비 몇 분 공부했는지"를 나타냅니다.
//!
//! ## 구조체 역할
//! - `LearningRecord`: DB에 저장된 기록 (응답용)
//! - `NewLearningRecord`: 생성 시 INSERT할 값 (기본값이 모두 채워진 상태)
//! - `LearningRecordChanges`: 검증을 통과한 수정 사항 (PATCH/PUT)

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::validation::FieldErrors;

/// 기록 날짜를 생략했을 때 쓰는 "오늘" (서버 기준 UTC 날짜)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 학습 기록 — DB의 `learning_records` 테이블 한 행에 대응합니다.
///
/// JSON으로는 `topic`이 테마 객체가 아니라 테마 ID 숫자 하나로 나갑니다.
/// 예: `{ "id": 3, "topic": 1, "date": "2024-03-01", "minutes": 30, "planned_minutes": 45, "memo": null }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct LearningRecord {
    pub id: i64,
    /// 소속 테마의 ID (외래키). DB 컬럼명은 `topic_id`입니다.
    #[sqlx(rename = "topic_id")]
    pub topic: i64,
    /// 학습한 날짜. DB에는 "YYYY-MM-DD" TEXT로 저장됩니다.
    pub date: NaiveDate,
    /// 실제 학습 시간(분)
    pub minutes: i64,
    /// 계획한 학습 시간(분)
    pub planned_minutes: i64,
    pub memo: Option<String>,
}

impl LearningRecord {
    /// 기존 기록에 변경 사항을 합칩니다. 변경 사항에 없는 필드는 그대로 둡니다.
    pub fn apply(&mut self, changes: LearningRecordChanges) {
        if let Some(topic) = changes.topic {
            self.topic = topic;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(minutes) = changes.minutes {
            self.minutes = minutes;
        }
        if let Some(planned_minutes) = changes.planned_minutes {
            self.planned_minutes = planned_minutes;
        }
        // Some(None)이면 메모를 지우고, None이면 건드리지 않습니다.
        if let Some(memo) = changes.memo {
            self.memo = memo;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLearningRecord {
    pub topic: i64,
    pub date: NaiveDate,
    pub minutes: i64,
    pub planned_minutes: i64,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearningRecordChanges {
    pub topic: Option<i64>,
    pub date: Option<NaiveDate>,
    pub minutes: Option<i64>,
    pub planned_minutes: Option<i64>,
    /// None = 필드 누락 (변경 안 함), Some(None) = null (메모 삭제), Some(Some(text)) = 메모 지정
    pub memo: Option<Option<String>>,
}

impl TryFrom<LearningRecordChanges> for NewLearningRecord {
    type Error = FieldErrors;

    /// `topic`만 필수이고 나머지는 생략 시 기본값(오늘, 0분, 메모 없음)을 씁니다.
    fn try_from(changes: LearningRecordChanges) -> Result<Self, Self::Error> {
        Ok(Self {
            topic: changes.topic.ok_or_else(|| FieldErrors::required("topic"))?,
            date: changes.date.unwrap_or_else(today),
            minutes: changes.minutes.unwrap_or(0),
            planned_minutes: changes.planned_minutes.unwrap_or(0),
            memo: changes.memo.flatten(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LearningRecord {
        LearningRecord {
            id: 1,
            topic: 2,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            minutes: 30,
            planned_minutes: 60,
            memo: Some("chapter 1".to_string()),
        }
    }

    #[test]
    fn record_serializes_topic_as_bare_id() {
        assert_eq!(
            serde_json::to_value(record()).unwrap(),
            serde_json::json!({
                "id": 1,
                "topic": 2,
                "date": "2024-01-01",
                "minutes": 30,
                "planned_minutes": 60,
                "memo": "chapter 1"
            })
        );
    }

    #[test]
    fn apply_only_overwrites_present_fields() {
        let mut rec = record();
        rec.apply(LearningRecordChanges {
            memo: Some(Some("reviewed".to_string())),
            ..Default::default()
        });

        let mut expected = record();
        expected.memo = Some("reviewed".to_string());
        assert_eq!(rec, expected);
    }

    #[test]
    fn apply_explicit_null_clears_memo() {
        let mut rec = record();
        rec.apply(LearningRecordChanges {
            memo: Some(None),
            minutes: Some(-5),
            ..Default::default()
        });

        assert_eq!(rec.memo, None);
        assert_eq!(rec.minutes, -5);
        assert_eq!(rec.planned_minutes, 60);
    }

    #[test]
    fn new_record_requires_topic_and_fills_defaults() {
        let err = NewLearningRecord::try_from(LearningRecordChanges::default()).unwrap_err();
        assert!(err.get("topic").is_some());

        let new = NewLearningRecord::try_from(LearningRecordChanges {
            topic: Some(4),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(new.topic, 4);
        assert_eq!(new.minutes, 0);
        assert_eq!(new.planned_minutes, 0);
        assert_eq!(new.memo, None);
    }
}
