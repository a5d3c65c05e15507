// src/application/board.rs
use tracing::{debug, error, info, instrument, warn};

use crate::application::{CardRepository, Notices};
use crate::domain::{
    distinct_tags, Card, CardForm, CardId, CardPatch, Column, Direction, DomainError, NewCard,
    TagFilter,
};

/// Lifecycle of an optimistic create.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Visible locally under a provisional id, store has not answered yet.
    Pending { provisional: CardId },
    /// Provisional entry replaced by the stored record.
    Confirmed { provisional: CardId, card: Card },
    /// Provisional entry removed after the store refused it.
    RolledBack { provisional: CardId, reason: String },
}

/// A create that has been applied locally and awaits the store's answer.
///
/// Hand it back to [`BoardController::resolve_add`] once the store replied.
#[derive(Debug)]
#[must_use = "a pending add stays provisional until it is resolved"]
pub struct PendingAdd {
    provisional: CardId,
    draft: NewCard,
}

impl PendingAdd {
    pub fn provisional_id(&self) -> CardId {
        self.provisional
    }

    pub fn draft(&self) -> &NewCard {
        &self.draft
    }

    pub fn state(&self) -> Mutation {
        Mutation::Pending {
            provisional: self.provisional,
        }
    }
}

/// Owns the visible card list, the derived tags and the tag filter.
///
/// Every store call goes through the repository; outcomes are reported as
/// notices and never escape as panics.
pub struct BoardController<R: CardRepository> {
    repository: R,
    cards: Vec<Card>,
    tags: Vec<String>,
    filter: TagFilter,
    notices: Notices,
    last_provisional: i64,
}

impl<R: CardRepository> BoardController<R> {
    pub fn new(repository: R) -> Self {
        Self::with_notices(repository, Notices::default())
    }

    pub fn with_notices(repository: R, notices: Notices) -> Self {
        Self {
            repository,
            cards: Vec::new(),
            tags: Vec::new(),
            filter: TagFilter::All,
            notices,
            last_provisional: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Replace the local list with the store's cards.
    ///
    /// On failure the board is emptied and a notice is raised.
    #[instrument(level = "debug", skip(self))]
    pub async fn load(&mut self) -> Result<usize, DomainError> {
        match self.repository.list_cards().await {
            Ok(cards) => {
                info!(count = cards.len(), "Loaded cards");
                self.cards = cards;
                self.refresh_tags();
                Ok(self.cards.len())
            }
            Err(e) => {
                error!(error = %e, "Failed to load cards");
                self.cards.clear();
                self.refresh_tags();
                self.notices.danger("Failed to load cards");
                Err(e)
            }
        }
    }

    pub fn set_filter(&mut self, filter: TagFilter) {
        debug!(%filter, "Filter changed");
        self.filter = filter;
    }

    /// Cards of `column` passing the current filter, in list order.
    pub fn cards_in(&self, column: Column) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|c| c.column == column && self.filter.matches(c))
            .collect()
    }

    /// Validate the form and insert a provisional card.
    ///
    /// Nothing changes when validation fails.
    pub fn begin_add(&mut self, form: &CardForm) -> Result<PendingAdd, DomainError> {
        let draft = form.validate()?;
        let provisional = self.next_provisional_id();

        self.cards.push(draft.clone().with_id(provisional));
        self.refresh_tags();
        debug!(%provisional, "Inserted provisional card");

        Ok(PendingAdd {
            provisional,
            draft,
        })
    }

    /// Settle a pending add with the store's answer.
    pub fn resolve_add(
        &mut self,
        pending: PendingAdd,
        outcome: Result<Card, DomainError>,
    ) -> Mutation {
        let provisional = pending.provisional;
        match outcome {
            Ok(card) => {
                match self.position(provisional) {
                    Some(index) => self.cards[index] = card.clone(),
                    None => warn!(%provisional, "Provisional card vanished before confirmation"),
                }
                self.refresh_tags();
                info!(%provisional, id = %card.id, "Card added");
                self.notices.success("Card added");
                Mutation::Confirmed { provisional, card }
            }
            Err(e) => {
                error!(%provisional, error = %e, "Failed to add card");
                self.cards.retain(|c| c.id != provisional);
                self.refresh_tags();
                self.notices.danger("Failed to add card");
                Mutation::RolledBack {
                    provisional,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Optimistic create. Only validation errors are returned as `Err`;
    /// store failures come back as [`Mutation::RolledBack`].
    #[instrument(level = "debug", skip(self, form))]
    pub async fn add(&mut self, form: &CardForm) -> Result<Mutation, DomainError> {
        let pending = self.begin_add(form)?;
        let outcome = self.repository.create_card(pending.draft()).await;
        Ok(self.resolve_add(pending, outcome))
    }

    /// Apply an edit form to an existing card, sending only changed fields.
    #[instrument(level = "debug", skip(self, form))]
    pub async fn update(&mut self, id: CardId, form: &CardForm) -> Result<Card, DomainError> {
        let target = form.validate()?;
        let current = self.persisted(id)?;

        let patch = CardPatch::diff(current, &target);
        if patch.is_empty() {
            debug!(%id, "Nothing changed");
            return Ok(current.clone());
        }
        self.patch(id, patch).await
    }

    /// Send a partial update and swap in the returned record.
    ///
    /// The local list is untouched when the store refuses.
    #[instrument(level = "debug", skip(self))]
    pub async fn patch(&mut self, id: CardId, patch: CardPatch) -> Result<Card, DomainError> {
        self.persisted(id)?;

        match self.repository.update_card(id, &patch).await {
            Ok(card) => {
                if let Some(index) = self.position(id) {
                    self.cards[index] = card.clone();
                }
                self.refresh_tags();
                info!(%id, "Card updated");
                self.notices.success("Card updated");
                Ok(card)
            }
            Err(e) => {
                error!(%id, error = %e, "Failed to update card");
                self.notices.danger("Failed to update card");
                Err(e)
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn delete(&mut self, id: CardId) -> Result<(), DomainError> {
        self.persisted(id)?;

        match self.repository.delete_card(id).await {
            Ok(()) => {
                self.cards.retain(|c| c.id != id);
                self.refresh_tags();
                info!(%id, "Card deleted");
                self.notices.success("Card deleted");
                Ok(())
            }
            Err(e) => {
                error!(%id, error = %e, "Failed to delete card");
                self.notices.danger("Failed to delete card");
                Err(e)
            }
        }
    }

    /// Shift a card one column, wrapping at both ends.
    ///
    /// The new column is applied locally before the store is asked and is
    /// kept even if the store refuses.
    #[instrument(level = "debug", skip(self))]
    pub async fn move_card(&mut self, id: CardId, direction: Direction) -> Result<Card, DomainError> {
        let index = self
            .position(id)
            .filter(|_| !id.is_provisional())
            .ok_or(DomainError::CardNotFound(id))?;

        let target = self.cards[index].column.step(direction);
        self.cards[index].column = target;
        debug!(%id, column = %target, "Moved card locally");

        match self
            .repository
            .update_card(id, &CardPatch::column(target))
            .await
        {
            Ok(card) => {
                if let Some(index) = self.position(id) {
                    self.cards[index] = card.clone();
                }
                self.refresh_tags();
                info!(%id, column = %target, "Card moved");
                self.notices.success("Card moved");
                Ok(card)
            }
            Err(e) => {
                error!(%id, error = %e, "Failed to persist move");
                self.notices.danger("Failed to update card");
                Err(e)
            }
        }
    }

    fn next_provisional_id(&mut self) -> CardId {
        self.last_provisional -= 1;
        CardId(self.last_provisional)
    }

    fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Look up a card the store already knows about.
    fn persisted(&self, id: CardId) -> Result<&Card, DomainError> {
        self.card(id)
            .filter(|c| !c.id.is_provisional())
            .ok_or(DomainError::CardNotFound(id))
    }

    /// Recompute tags and drop a filter whose tag no longer exists.
    fn refresh_tags(&mut self) {
        self.tags = distinct_tags(&self.cards);
        if let Some(tag) = self.filter.tag() {
            if !self.tags.iter().any(|t| t == tag) {
                debug!(tag, "Selected tag vanished, showing all tags");
                self.filter = TagFilter::All;
            }
        }
    }
}
