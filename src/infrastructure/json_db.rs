// src/infrastructure/json_db.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::{Card, CardId, CardPatch, NewCard};

/// Stored user record. Passwords are kept and compared in plaintext: the
/// file is a disposable development fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    /// Fields other tools put on the record (json-server adds `id`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            extra: Map::new(),
        }
    }
}

/// Card as written to the store file, with any fields the board does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCard {
    #[serde(flatten)]
    pub card: Card,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Card> for StoredCard {
    fn from(card: Card) -> Self {
        Self {
            card,
            extra: Map::new(),
        }
    }
}

/// On-disk layout of the store file.
///
/// Top-level collections other than `users` and `memoryCards` are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub memory_cards: Vec<StoredCard>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Database {
    fn position(&self, id: CardId) -> Option<usize> {
        self.memory_cards.iter().position(|c| c.card.id == id)
    }
}

/// Flat JSON file holding users and cards, rewritten after every mutation.
///
/// A mutation is staged on a copy and only becomes visible once the file
/// write succeeded.
#[derive(Debug)]
pub struct JsonDb {
    path: Option<PathBuf>,
    data: Database,
}

impl JsonDb {
    /// Open the store file, creating an empty one when it does not exist.
    ///
    /// An existing file is read but not rewritten.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(?path, "Opening JSON store");

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store file {}", path.display()))?;
            let data = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse store file {}", path.display()))?;
            return Ok(Self {
                path: Some(path),
                data,
            });
        }

        info!(?path, "Store file missing, starting empty");
        let mut db = Self {
            path: Some(path),
            data: Database::default(),
        };
        db.commit(Database::default())?;
        Ok(db)
    }

    /// Store that never touches the disk.
    pub fn in_memory(data: Database) -> Self {
        Self { path: None, data }
    }

    pub fn data(&self) -> &Database {
        &self.data
    }

    /// Register a user unless the username is already taken.
    pub fn add_user(&mut self, username: &str, password: &str) -> Result<bool> {
        if self.data.users.iter().any(|u| u.username == username) {
            debug!(username, "User already present");
            return Ok(false);
        }
        let mut next = self.data.clone();
        next.users.push(User::new(username, password));
        self.commit(next)?;
        Ok(true)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.data
            .users
            .iter()
            .any(|u| u.username == username && u.password == password)
    }

    pub fn cards(&self) -> Vec<Card> {
        self.data.memory_cards.iter().map(|c| c.card.clone()).collect()
    }

    pub fn card(&self, id: CardId) -> Option<Card> {
        self.data.position(id).map(|i| self.data.memory_cards[i].card.clone())
    }

    /// Insert a card under the next free id (ids start at 1).
    pub fn insert(&mut self, card: NewCard) -> Result<Card> {
        let next_id = self
            .data
            .memory_cards
            .iter()
            .map(|c| c.card.id.0)
            .max()
            .unwrap_or(0)
            .max(0)
            + 1;
        let card = card.with_id(CardId(next_id));

        let mut next = self.data.clone();
        next.memory_cards.push(StoredCard::from(card.clone()));
        self.commit(next)?;
        Ok(card)
    }

    /// Merge `patch` into the card; `None` when the id is unknown.
    pub fn update(&mut self, id: CardId, patch: &CardPatch) -> Result<Option<Card>> {
        let Some(index) = self.data.position(id) else {
            return Ok(None);
        };
        let mut next = self.data.clone();
        patch.apply_to(&mut next.memory_cards[index].card);
        let updated = next.memory_cards[index].card.clone();
        self.commit(next)?;
        Ok(Some(updated))
    }

    pub fn remove(&mut self, id: CardId) -> Result<bool> {
        let Some(index) = self.data.position(id) else {
            return Ok(false);
        };
        let mut next = self.data.clone();
        next.memory_cards.remove(index);
        self.commit(next)?;
        Ok(true)
    }

    /// Write `next` to disk, then make it the current state.
    fn commit(&mut self, next: Database) -> Result<()> {
        if let Some(path) = &self.path {
            let json =
                serde_json::to_string_pretty(&next).context("Failed to serialize store")?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write store file {}", path.display()))?;
        }
        self.data = next;
        Ok(())
    }
}
