//! JSON-file backed stores.
//!
//! Each store owns one file holding its [`Ledger`]. Mutations are staged on a
//! copy of the ledger, written to `<file>.tmp`, renamed over the original, and
//! only then committed in memory. A failed write leaves both the file and
//! the in-memory state unchanged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::configuration::{Configuration, ConfigurationFacts, ConfigurationPatch};
use crate::models::response::{NewResponseRecord, ResponseRecord};
use crate::store::{
    seed_default_configuration, ConfigurationStore, Identified, Ledger, ResponseStore, StoreError,
};

pub const CONFIGURATIONS_FILE: &str = "configurations.json";
pub const RESPONSES_FILE: &str = "responses.json";

pub struct FileConfigurationStore {
    path: PathBuf,
    ledger: Mutex<Ledger<Configuration>>,
}

impl FileConfigurationStore {
    /// Opens `<dir>/configurations.json`, seeding it if missing or empty.
    pub async fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(CONFIGURATIONS_FILE);
        let mut ledger = read_ledger::<Configuration>(&path).await?;

        if ledger.is_empty() {
            let seeded = seed_default_configuration(&mut ledger);
            write_ledger(&path, &ledger).await?;
            info!(
                "Seeded default configuration {} at {}",
                seeded.id,
                path.display()
            );
        }

        Ok(Self {
            path,
            ledger: Mutex::new(ledger),
        })
    }
}

#[async_trait]
impl ConfigurationStore for FileConfigurationStore {
    async fn get(&self, id: u64) -> Result<Option<Configuration>, StoreError> {
        Ok(self.ledger.lock().await.get(id))
    }

    async fn latest(&self) -> Result<Option<Configuration>, StoreError> {
        Ok(self.ledger.lock().await.latest())
    }

    async fn list(&self) -> Result<Vec<Configuration>, StoreError> {
        Ok(self.ledger.lock().await.sorted())
    }

    async fn create(&self, facts: ConfigurationFacts) -> Result<Configuration, StoreError> {
        let mut ledger = self.ledger.lock().await;
        let mut staged = ledger.clone();
        let created = staged.push_with(|id| Configuration { id, facts });

        write_ledger(&self.path, &staged).await?;
        *ledger = staged;

        info!("Created configuration {}", created.id);
        Ok(created)
    }

    async fn update(
        &self,
        id: u64,
        patch: &ConfigurationPatch,
    ) -> Result<Option<Configuration>, StoreError> {
        let mut ledger = self.ledger.lock().await;
        let mut staged = ledger.clone();
        let Some(existing) = staged.get_mut(id) else {
            return Ok(None);
        };
        existing.facts = existing.facts.apply(patch);
        let updated = existing.clone();

        write_ledger(&self.path, &staged).await?;
        *ledger = staged;

        info!("Updated configuration {id} in place");
        Ok(Some(updated))
    }
}

pub struct FileResponseStore {
    path: PathBuf,
    ledger: Mutex<Ledger<ResponseRecord>>,
}

impl FileResponseStore {
    /// Opens `<dir>/responses.json`; a missing file is an empty store.
    pub async fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(RESPONSES_FILE);
        let ledger = read_ledger::<ResponseRecord>(&path).await?;
        Ok(Self {
            path,
            ledger: Mutex::new(ledger),
        })
    }
}

#[async_trait]
impl ResponseStore for FileResponseStore {
    async fn get(&self, id: u64) -> Result<Option<ResponseRecord>, StoreError> {
        Ok(self.ledger.lock().await.get(id))
    }

    async fn create(&self, record: NewResponseRecord) -> Result<ResponseRecord, StoreError> {
        let mut ledger = self.ledger.lock().await;
        let mut staged = ledger.clone();
        let created = staged.push_with(|id| record.into_record(id));

        write_ledger(&self.path, &staged).await?;
        *ledger = staged;

        info!(
            "Created response {} for configuration {}",
            created.id, created.configuration_id
        );
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<ResponseRecord>, StoreError> {
        Ok(self.ledger.lock().await.sorted())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File I/O
// ────────────────────────────────────────────────────────────────────────────

async fn read_ledger<T>(path: &Path) -> Result<Ledger<T>, StoreError>
where
    T: DeserializeOwned + Identified + Clone,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} does not exist yet, starting empty", path.display());
            return Ok(Ledger::default());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut ledger: Ledger<T> =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    ledger.normalize()?;
    Ok(ledger)
}

async fn write_ledger<T: Serialize>(path: &Path, ledger: &Ledger<T>) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = serde_json::to_vec_pretty(ledger).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}
