//! Persistence for configurations and response records.
//!
//! Both stores are append-only with monotonically assigned `u64` ids. The id
//! counter lives next to the items it numbers (see [`Ledger`]) and is only
//! advanced while the owning store's lock is held.
//!
//! Backends:
//! - [`memory`]: process-lifetime state.
//! - [`file`]: one JSON document per store, rewritten on every mutation.
//!
//! `AppState` carries `Arc<dyn ConfigurationStore>` / `Arc<dyn ResponseStore>`,
//! chosen at startup via `STORE_BACKEND`.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::configuration::{Configuration, ConfigurationFacts, ConfigurationPatch};
use crate::models::response::{NewResponseRecord, ResponseRecord};

pub mod file;
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("identifier space exhausted (next id would exceed u64::MAX)")]
    IdsExhausted,
}

// ────────────────────────────────────────────────────────────────────────────
// Traits
// ────────────────────────────────────────────────────────────────────────────

/// Versioned configuration snapshots. Not-found is `Ok(None)`.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    async fn get(&self, id: u64) -> Result<Option<Configuration>, StoreError>;

    /// The configuration with the highest id; last inserted wins on a tie.
    async fn latest(&self) -> Result<Option<Configuration>, StoreError>;

    /// All configurations in ascending id order.
    async fn list(&self) -> Result<Vec<Configuration>, StoreError>;

    /// Saves a new snapshot under the next id.
    async fn create(&self, facts: ConfigurationFacts) -> Result<Configuration, StoreError>;

    /// Merges `patch` into an existing configuration, keeping its id.
    async fn update(
        &self,
        id: u64,
        patch: &ConfigurationPatch,
    ) -> Result<Option<Configuration>, StoreError>;
}

/// Generated responses. Records are never updated or deleted.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    async fn get(&self, id: u64) -> Result<Option<ResponseRecord>, StoreError>;

    async fn create(&self, record: NewResponseRecord) -> Result<ResponseRecord, StoreError>;

    /// All records in ascending id order.
    async fn list(&self) -> Result<Vec<ResponseRecord>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Ledger: items plus their id counter
// ────────────────────────────────────────────────────────────────────────────

pub(crate) trait Identified {
    fn id(&self) -> u64;
}

impl Identified for Configuration {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Identified for ResponseRecord {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Items of one store with the next id to hand out. This is also the on-disk
/// document shape of the file backend, so ids survive restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Ledger<T> {
    next_id: u64,
    items: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

impl<T: Identified + Clone> Ledger<T> {
    /// Raises `next_id` above every stored id (guards hand-edited files).
    /// Fails if no id is left to hand out.
    pub(crate) fn normalize(&mut self) -> Result<(), StoreError> {
        let max_id = self.items.iter().map(Identified::id).max().unwrap_or(0);
        let floor = max_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        self.next_id = self.next_id.max(floor);
        if self.next_id == u64::MAX {
            return Err(StoreError::IdsExhausted);
        }
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn get(&self, id: u64) -> Option<T> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub(crate) fn latest(&self) -> Option<T> {
        // max_by_key keeps the last of equal maxima, i.e. the last inserted.
        self.items.iter().max_by_key(|item| item.id()).cloned()
    }

    pub(crate) fn sorted(&self) -> Vec<T> {
        let mut items = self.items.clone();
        items.sort_by_key(Identified::id);
        items
    }

    /// Assigns the next id, builds the item from it, and stores it.
    pub(crate) fn push_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let item = build(id);
        self.items.push(item.clone());
        item
    }
}

/// Adds the sample configuration under the ledger's next id.
pub(crate) fn seed_default_configuration(ledger: &mut Ledger<Configuration>) -> Configuration {
    ledger.push_with(|id| Configuration {
        id,
        facts: ConfigurationFacts::sample(),
    })
}

pub(crate) fn seeded_configurations() -> Ledger<Configuration> {
    let mut ledger = Ledger::default();
    seed_default_configuration(&mut ledger);
    ledger
}
