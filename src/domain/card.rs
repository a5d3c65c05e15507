// src/domain/card.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Column;

/// Card identifier.
///
/// The store hands out positive ids. Negative ids are provisional: they only
/// exist locally while a create is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl CardId {
    pub fn is_provisional(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CardId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub column: Column,
}

/// Card payload before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub column: Column,
}

impl NewCard {
    pub fn with_id(self, id: CardId) -> Card {
        Card {
            id,
            question: self.question,
            answer: self.answer,
            description: self.description,
            tag: self.tag,
            column: self.column,
        }
    }
}

/// Partial update; absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<Column>,
}

impl CardPatch {
    pub fn column(column: Column) -> Self {
        Self {
            column: Some(column),
            ..Default::default()
        }
    }

    /// Patch holding only the fields of `target` that differ from `current`.
    pub fn diff(current: &Card, target: &NewCard) -> Self {
        fn changed<T: PartialEq + Clone>(old: &T, new: &T) -> Option<T> {
            (old != new).then(|| new.clone())
        }

        Self {
            question: changed(&current.question, &target.question),
            answer: changed(&current.answer, &target.answer),
            description: changed(&current.description, &target.description),
            tag: changed(&current.tag, &target.tag),
            column: changed(&current.column, &target.column),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.answer.is_none()
            && self.description.is_none()
            && self.tag.is_none()
            && self.column.is_none()
    }

    pub fn apply_to(&self, card: &mut Card) {
        if let Some(question) = &self.question {
            card.question = question.clone();
        }
        if let Some(answer) = &self.answer {
            card.answer = answer.clone();
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        if let Some(tag) = &self.tag {
            card.tag = tag.clone();
        }
        if let Some(column) = self.column {
            card.column = column;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card {
            id: CardId(7),
            question: "2 + 2?".to_string(),
            answer: "4".to_string(),
            description: String::new(),
            tag: "math".to_string(),
            column: Column::ToLearn,
        }
    }

    #[test]
    fn given_negative_id_when_checking_then_is_provisional() {
        assert!(CardId(-3).is_provisional());
        assert!(!CardId(3).is_provisional());
    }

    #[test]
    fn given_changed_tag_and_column_when_diffing_then_patch_holds_only_those() {
        let current = card();
        let target = NewCard {
            question: current.question.clone(),
            answer: current.answer.clone(),
            description: String::new(),
            tag: "arithmetic".to_string(),
            column: Column::Mastered,
        };

        let patch = CardPatch::diff(&current, &target);

        assert_eq!(patch.tag.as_deref(), Some("arithmetic"));
        assert_eq!(patch.column, Some(Column::Mastered));
        assert!(patch.question.is_none());
        assert!(patch.answer.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn given_column_patch_when_serializing_then_omits_absent_fields() {
        let json = serde_json::to_value(CardPatch::column(Column::LittleKnown)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"column": {"id": 2, "label": "a little known", "order": 2}})
        );
    }

    #[test]
    fn given_patch_when_applying_then_updates_present_fields() {
        let mut target = card();
        let patch = CardPatch {
            answer: Some("four".to_string()),
            ..Default::default()
        };

        patch.apply_to(&mut target);

        assert_eq!(target.answer, "four");
        assert_eq!(target.question, "2 + 2?");
    }

    #[test]
    fn given_store_json_when_deserializing_card_then_reads_column_record() {
        let json = serde_json::json!({
            "id": 1,
            "question": "Capital of France?",
            "answer": "Paris",
            "description": "",
            "tag": "geo",
            "column": {"id": 4, "label": "mastered", "order": 4}
        });

        let card: Card = serde_json::from_value(json).unwrap();

        assert_eq!(card.id, CardId(1));
        assert_eq!(card.column, Column::Mastered);
    }
}
