// src/infrastructure/http.rs
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{CardRepository, CredentialVerifier, Credentials};
use crate::constants::{AUTH_PATH, CARDS_PATH};
use crate::domain::{Card, CardId, CardPatch, DomainError, NewCard};

#[derive(Debug, Deserialize)]
struct AuthResponse {
    success: bool,
}

/// REST client for the card store.
#[derive(Debug, Clone)]
pub struct HttpCardStore {
    client: Client,
    base_url: String,
}

impl HttpCardStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, "Creating HttpCardStore");
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn cards_url(&self) -> String {
        format!("{}{}", self.base_url, CARDS_PATH)
    }

    fn card_url(&self, id: CardId) -> String {
        format!("{}{}/{}", self.base_url, CARDS_PATH, id)
    }
}

fn transport(e: reqwest::Error) -> DomainError {
    DomainError::Backend(format!("request failed: {e}"))
}

/// Turn a non-success status into a domain error; 404 on a card URL means
/// the card is gone.
fn check(response: Response, id: Option<CardId>) -> Result<Response, DomainError> {
    let status = response.status();
    match (status, id) {
        (s, _) if s.is_success() => Ok(response),
        (StatusCode::NOT_FOUND, Some(id)) => Err(DomainError::CardNotFound(id)),
        (s, _) => Err(DomainError::Backend(format!("store answered {s}"))),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, DomainError> {
    response
        .json::<T>()
        .await
        .map_err(|e| DomainError::Backend(format!("invalid store response: {e}")))
}

#[async_trait]
impl CardRepository for HttpCardStore {
    #[instrument(level = "debug", skip(self))]
    async fn list_cards(&self) -> Result<Vec<Card>, DomainError> {
        let response = self.client.get(self.cards_url()).send().await.map_err(transport)?;
        decode(check(response, None)?).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_card(&self, id: CardId) -> Result<Card, DomainError> {
        let response = self.client.get(self.card_url(id)).send().await.map_err(transport)?;
        decode(check(response, Some(id))?).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_card(&self, card: &NewCard) -> Result<Card, DomainError> {
        let response = self
            .client
            .post(self.cards_url())
            .json(card)
            .send()
            .await
            .map_err(transport)?;
        decode(check(response, None)?).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn update_card(&self, id: CardId, patch: &CardPatch) -> Result<Card, DomainError> {
        let response = self
            .client
            .put(self.card_url(id))
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        decode(check(response, Some(id))?).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_card(&self, id: CardId) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.card_url(id))
            .send()
            .await
            .map_err(transport)?;
        check(response, Some(id))?;
        Ok(())
    }
}

#[async_trait]
impl CredentialVerifier for HttpCardStore {
    #[instrument(level = "debug", skip(self))]
    async fn verify(&self, credentials: &Credentials) -> Result<bool, DomainError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, AUTH_PATH))
            .json(credentials)
            .send()
            .await
            .map_err(transport)?;
        let answer: AuthResponse = decode(check(response, None)?).await?;
        Ok(answer.success)
    }
}
