//! # 학습 테마 모델 정의
//!
//! - `Topic`: DB에 저장된 테마 (응답용)
//! - `NewTopic`: 생성 시 INSERT할 값
//! - `TopicChanges`: 검증을 통과한 수정 사항 (PATCH/PUT)

use serde::Serialize;

use crate::validation::FieldErrors;

/// 학습 테마 — DB의 `topics` 테이블 한 행(row)에 대응합니다.
///
/// 테마를 삭제하면 이 테마를 참조하는 학습 기록도 모두 삭제됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Topic {
    /// 서버가 발급하는 식별자 (SQLite rowid)
    pub id: i64,
    /// 테마 제목 (예: "수학", "영어 단어")
    pub title: String,
}

impl Topic {
    /// 변경 사항 중 값이 있는 필드만 덮어씁니다.
    pub fn apply(&mut self, changes: TopicChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTopic {
    pub title: String,
}

/// 모든 필드가 Option: None이면 "변경하지 않음"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicChanges {
    pub title: Option<String>,
}

impl TryFrom<TopicChanges> for NewTopic {
    type Error = FieldErrors;

    fn try_from(changes: TopicChanges) -> Result<Self, Self::Error> {
        Ok(Self {
            title: changes.title.ok_or_else(|| FieldErrors::required("title"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn topic_serializes_to_id_and_title() {
        let topic = Topic {
            id: 3,
            title: "Math".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&topic).unwrap(),
            json!({ "id": 3, "title": "Math" })
        );
    }

    #[test]
    fn apply_without_title_keeps_existing() {
        let mut topic = Topic {
            id: 1,
            title: "Keep".to_string(),
        };
        topic.apply(TopicChanges::default());
        assert_eq!(topic.title, "Keep");
    }
}
