// src/domain/form.rs
use std::fmt;
use thiserror::Error;

use crate::domain::{Card, Column, NewCard};

/// Raw add/edit form input.
///
/// `tag` picks an existing tag, `new_tag` introduces one. When both are
/// filled the new tag wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardForm {
    pub question: String,
    pub answer: String,
    pub description: String,
    pub tag: String,
    pub new_tag: String,
    pub column: Option<Column>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Question,
    Answer,
    Tag,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Tag => "tag",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub problem: &'static str,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.problem))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}


impl CardForm {
    /// Edit form prefilled from an existing card.
    pub fn from_card(card: &Card) -> Self {
        Self {
            question: card.question.clone(),
            answer: card.answer.clone(),
            description: card.description.clone(),
            tag: card.tag.clone(),
            new_tag: String::new(),
            column: Some(card.column),
        }
    }

    /// Trimmed card ready for the store, or every field problem found.
    pub fn validate(&self) -> Result<NewCard, ValidationError> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        let tag = self.tag.trim();
        let new_tag = self.new_tag.trim();

        let mut errors = Vec::new();
        if question.is_empty() {
            errors.push(FieldError {
                field: Field::Question,
                problem: "is required",
            });
        }
        if answer.is_empty() {
            errors.push(FieldError {
                field: Field::Answer,
                problem: "is required",
            });
        }
        if tag.is_empty() && new_tag.is_empty() {
            errors.push(FieldError {
                field: Field::Tag,
                problem: "is required unless a new tag is given",
            });
        }
        if !errors.is_empty() {
            return Err(ValidationError { errors });
        }

        let tag = if new_tag.is_empty() { tag } else { new_tag };

        Ok(NewCard {
            question: question.to_string(),
            answer: answer.to_string(),
            description: self.description.trim().to_string(),
            tag: tag.to_string(),
            column: self.column.unwrap_or_default(),
        })
    }
}
