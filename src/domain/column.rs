// src/domain/column.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// One of the four fixed proficiency buckets, in board order.
///
/// On the wire a column travels as the full `{id, label, order}` record so the
/// backend file stays readable without this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColumnRecord", into = "ColumnRecord")]
pub enum Column {
    ToLearn,
    LittleKnown,
    KnownWell,
    Mastered,
}

/// Step direction for moving a card between columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Column {
    /// All columns in board order.
    pub const ALL: [Column; 4] = [
        Column::ToLearn,
        Column::LittleKnown,
        Column::KnownWell,
        Column::Mastered,
    ];

    pub fn id(&self) -> u8 {
        self.order()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ToLearn => "to learn",
            Self::LittleKnown => "a little known",
            Self::KnownWell => "known well",
            Self::Mastered => "mastered",
        }
    }

    /// 1-based position in the board.
    pub fn order(&self) -> u8 {
        match self {
            Self::ToLearn => 1,
            Self::LittleKnown => 2,
            Self::KnownWell => 3,
            Self::Mastered => 4,
        }
    }

    fn index(&self) -> usize {
        usize::from(self.order() - 1)
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }

    /// Neighbour column, wrapping around at both ends.
    pub fn step(&self, direction: Direction) -> Self {
        let len = Self::ALL.len();
        let current = self.index();
        let next = match direction {
            Direction::Previous => (current + len - 1) % len,
            Direction::Next => (current + 1) % len,
        };
        Self::ALL[next]
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::ToLearn
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Column {
    type Err = DomainError;

    /// Accepts the label ("known well"), a dashed/underscored slug
    /// ("known-well") or the numeric id ("3").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        if let Ok(id) = normalized.parse::<u8>() {
            return Self::from_id(id).ok_or_else(|| DomainError::UnknownColumn(s.to_string()));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == normalized)
            .ok_or_else(|| DomainError::UnknownColumn(s.to_string()))
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "previous" | "prev" | "left" => Ok(Self::Previous),
            "next" | "right" => Ok(Self::Next),
            other => Err(DomainError::UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnRecord {
    id: u8,
    #[serde(default)]
    label: String,
    #[serde(default)]
    order: u8,
}

impl TryFrom<ColumnRecord> for Column {
    type Error = DomainError;

    fn try_from(record: ColumnRecord) -> Result<Self, Self::Error> {
        Column::from_id(record.id).ok_or(DomainError::UnknownColumn(record.id.to_string()))
    }
}

impl From<Column> for ColumnRecord {
    fn from(column: Column) -> Self {
        Self {
            id: column.id(),
            label: column.label().to_string(),
            order: column.order(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Column::ToLearn, Column::LittleKnown)]
    #[case(Column::LittleKnown, Column::KnownWell)]
    #[case(Column::KnownWell, Column::Mastered)]
    #[case(Column::Mastered, Column::ToLearn)]
    fn given_column_when_stepping_next_then_wraps_after_last(
        #[case] from: Column,
        #[case] expected: Column,
    ) {
        assert_eq!(from.step(Direction::Next), expected);
    }

    #[rstest]
    #[case(Column::ToLearn, Column::Mastered)]
    #[case(Column::LittleKnown, Column::ToLearn)]
    #[case(Column::KnownWell, Column::LittleKnown)]
    #[case(Column::Mastered, Column::KnownWell)]
    fn given_column_when_stepping_previous_then_wraps_before_first(
        #[case] from: Column,
        #[case] expected: Column,
    ) {
        assert_eq!(from.step(Direction::Previous), expected);
    }

    #[test]
    fn given_any_column_when_stepping_four_times_then_returns_to_start() {
        for start in Column::ALL {
            for direction in [Direction::Next, Direction::Previous] {
                let end = (0..4).fold(start, |c, _| c.step(direction));
                assert_eq!(end, start, "{start} via {direction:?}");
            }
        }
    }

    #[rstest]
    #[case("to learn", Column::ToLearn)]
    #[case("A-Little-Known", Column::LittleKnown)]
    #[case("known_well", Column::KnownWell)]
    #[case("4", Column::Mastered)]
    fn given_text_when_parsing_column_then_resolves(#[case] input: &str, #[case] expected: Column) {
        assert_eq!(input.parse::<Column>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_label_when_parsing_column_then_fails() {
        let result = "forgotten".parse::<Column>();
        assert!(matches!(result, Err(DomainError::UnknownColumn(_))));
    }

    #[test]
    fn given_column_when_serializing_then_writes_full_record() {
        let json = serde_json::to_value(Column::KnownWell).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 3, "label": "known well", "order": 3})
        );
    }

    #[test]
    fn given_record_with_unknown_id_when_deserializing_then_fails() {
        let result: Result<Column, _> =
            serde_json::from_value(serde_json::json!({"id": 9, "label": "x", "order": 9}));
        assert!(result.is_err());
    }
}
