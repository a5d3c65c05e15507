// src/domain/error.rs
use thiserror::Error;

use crate::domain::{CardId, ValidationError};

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Card not found: {0}")]
    CardNotFound(CardId),
    #[error("Invalid card: {0}")]
    Validation(#[from] ValidationError),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
}
