// src/application/repository.rs
use async_trait::async_trait;

use crate::domain::{Card, CardId, CardPatch, DomainError, NewCard};

/// Card access layer: one call per store endpoint, nothing more.
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn list_cards(&self) -> Result<Vec<Card>, DomainError>;

    async fn get_card(&self, id: CardId) -> Result<Card, DomainError>;

    /// Create a card; the store assigns the id
    async fn create_card(&self, card: &NewCard) -> Result<Card, DomainError>;

    /// Send only the fields present in `patch` and return the stored card
    async fn update_card(&self, id: CardId, patch: &CardPatch) -> Result<Card, DomainError>;

    async fn delete_card(&self, id: CardId) -> Result<(), DomainError>;
}
