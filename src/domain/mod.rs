// src/domain/mod.rs
pub mod card;
pub mod column;
pub mod error;
pub mod form;
pub mod tag;

pub use card::{Card, CardId, CardPatch, NewCard};
pub use column::{Column, Direction};
pub use error::DomainError;
pub use form::{CardForm, Field, FieldError, ValidationError};
pub use tag::{distinct_tags, TagFilter};
