// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::env;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{CardRepository, CredentialVerifier, Credentials};
use crate::domain::{Card, CardId, CardPatch, Column, DomainError, NewCard};

/// Card with predictable text, for fixtures.
pub fn card(id: i64, tag: &str, column: Column) -> Card {
    Card {
        id: CardId(id),
        question: format!("Question {id}"),
        answer: format!("Answer {id}"),
        description: String::new(),
        tag: tag.to_string(),
        column,
    }
}

#[derive(Default)]
struct MockState {
    cards: Vec<Card>,
    create_calls: usize,
    last_patch: Option<(CardId, CardPatch)>,
}

/// In-memory card store for testing the board without a server
///
/// Failures are configured per operation (and per id where it makes sense).
///
/// # Examples
///
/// ```
/// use memocards::domain::Column;
/// use memocards::util::testing::{card, MockCardRepository};
///
/// let mock = MockCardRepository::builder()
///     .with_card(card(1, "math", Column::ToLearn))
///     .failing_delete(1)
///     .build();
/// ```
pub struct MockCardRepository {
    state: Mutex<MockState>,
    fail_list: bool,
    fail_create: bool,
    fail_update: HashSet<CardId>,
    fail_delete: HashSet<CardId>,
}

impl MockCardRepository {
    pub fn builder() -> MockCardRepositoryBuilder {
        MockCardRepositoryBuilder::new()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    /// Cards currently held by the mock store
    pub fn stored(&self) -> Vec<Card> {
        self.state().cards.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.state().create_calls
    }

    /// Most recent patch received by update_card
    pub fn last_patch(&self) -> Option<(CardId, CardPatch)> {
        self.state().last_patch.clone()
    }
}

#[async_trait]
impl CardRepository for MockCardRepository {
    async fn list_cards(&self) -> Result<Vec<Card>, DomainError> {
        if self.fail_list {
            return Err(DomainError::Backend("connection refused".to_string()));
        }
        Ok(self.stored())
    }

    async fn get_card(&self, id: CardId) -> Result<Card, DomainError> {
        self.state()
            .cards
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(DomainError::CardNotFound(id))
    }

    async fn create_card(&self, card: &NewCard) -> Result<Card, DomainError> {
        let mut state = self.state();
        state.create_calls += 1;
        if self.fail_create {
            return Err(DomainError::Backend("500 Internal Server Error".to_string()));
        }
        let next = state.cards.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        let created = card.clone().with_id(CardId(next));
        state.cards.push(created.clone());
        Ok(created)
    }

    async fn update_card(&self, id: CardId, patch: &CardPatch) -> Result<Card, DomainError> {
        let mut state = self.state();
        state.last_patch = Some((id, patch.clone()));
        if self.fail_update.contains(&id) {
            return Err(DomainError::Backend("500 Internal Server Error".to_string()));
        }
        let card = state
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::CardNotFound(id))?;
        patch.apply_to(card);
        Ok(card.clone())
    }

    async fn delete_card(&self, id: CardId) -> Result<(), DomainError> {
        if self.fail_delete.contains(&id) {
            return Err(DomainError::Backend("500 Internal Server Error".to_string()));
        }
        let mut state = self.state();
        let before = state.cards.len();
        state.cards.retain(|c| c.id != id);
        if state.cards.len() == before {
            return Err(DomainError::CardNotFound(id));
        }
        Ok(())
    }
}

/// Builder for MockCardRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockCardRepositoryBuilder {
    cards: Vec<Card>,
    fail_list: bool,
    fail_create: bool,
    fail_update: HashSet<CardId>,
    fail_delete: HashSet<CardId>,
}

impl MockCardRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            cards: vec![],
            fail_list: false,
            fail_create: false,
            fail_update: HashSet::new(),
            fail_delete: HashSet::new(),
        }
    }

    /// Add a card the store already holds
    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    /// Make list_cards fail with a transport error
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Make every create_card fail
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make update_card fail for a specific ID
    pub fn failing_update(mut self, id: i64) -> Self {
        self.fail_update.insert(CardId(id));
        self
    }

    /// Make delete_card fail for a specific ID
    pub fn failing_delete(mut self, id: i64) -> Self {
        self.fail_delete.insert(CardId(id));
        self
    }

    pub fn build(self) -> MockCardRepository {
        MockCardRepository {
            state: Mutex::new(MockState {
                cards: self.cards,
                ..Default::default()
            }),
            fail_list: self.fail_list,
            fail_create: self.fail_create,
            fail_update: self.fail_update,
            fail_delete: self.fail_delete,
        }
    }
}

impl Default for MockCardRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Credential verifier backed by a fixed user list
pub struct MockVerifier {
    users: Vec<Credentials>,
    unreachable: bool,
}

impl MockVerifier {
    pub fn with_user(username: &str, password: &str) -> Self {
        Self {
            users: vec![Credentials::new(username, password)],
            unreachable: false,
        }
    }

    /// Verifier whose backend cannot be reached
    pub fn failing() -> Self {
        Self {
            users: vec![],
            unreachable: true,
        }
    }
}

#[async_trait]
impl CredentialVerifier for MockVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<bool, DomainError> {
        if self.unreachable {
            return Err(DomainError::Backend("connection refused".to_string()));
        }
        Ok(self.users.iter().any(|u| u == credentials))
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "tower"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
