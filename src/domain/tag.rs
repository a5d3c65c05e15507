// src/domain/tag.rs
use std::collections::HashSet;
use std::fmt;

use crate::domain::Card;

/// Tag filter applied to the board. `All` shows every card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => card.tag == *tag,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Tag(tag) => Some(tag),
        }
    }
}

impl From<Option<String>> for TagFilter {
    fn from(tag: Option<String>) -> Self {
        tag.map_or(Self::All, Self::Tag)
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all tags"),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

/// Distinct tags in first-seen order.
pub fn distinct_tags(cards: &[Card]) -> Vec<String> {
    let mut seen = HashSet::new();
    cards
        .iter()
        .filter(|card| seen.insert(card.tag.as_str()))
        .map(|card| card.tag.clone())
        .collect()
}
