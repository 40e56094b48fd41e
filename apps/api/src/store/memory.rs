use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::configuration::{Configuration, ConfigurationFacts, ConfigurationPatch};
use crate::models::response::{NewResponseRecord, ResponseRecord};
use crate::store::{
    seeded_configurations, ConfigurationStore, Ledger, ResponseStore, StoreError,
};

/// In-process configuration store, seeded with the sample configuration.
pub struct MemoryConfigurationStore {
    ledger: Mutex<Ledger<Configuration>>,
}

impl MemoryConfigurationStore {
    pub fn new() -> Self {
        Self {
            ledger: Mutex::new(seeded_configurations()),
        }
    }
}

impl Default for MemoryConfigurationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigurationStore for MemoryConfigurationStore {
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
        let created = self
            .ledger
            .lock()
            .await
            .push_with(|id| Configuration { id, facts });
        info!("Created configuration {}", created.id);
        Ok(created)
    }

    async fn update(
        &self,
        id: u64,
        patch: &ConfigurationPatch,
    ) -> Result<Option<Configuration>, StoreError> {
        let mut ledger = self.ledger.lock().await;
        let Some(existing) = ledger.get_mut(id) else {
            return Ok(None);
        };
        existing.facts = existing.facts.apply(patch);
        info!("Updated configuration {id} in place");
        Ok(Some(existing.clone()))
    }
}

/// In-process response record store.
#[derive(Default)]
pub struct MemoryResponseStore {
    ledger: Mutex<Ledger<ResponseRecord>>,
}

impl MemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseStore for MemoryResponseStore {
    async fn get(&self, id: u64) -> Result<Option<ResponseRecord>, StoreError> {
        Ok(self.ledger.lock().await.get(id))
    }

    async fn create(&self, record: NewResponseRecord) -> Result<ResponseRecord, StoreError> {
        let created = self
            .ledger
            .lock()
            .await
            .push_with(|id| record.into_record(id));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::FALLBACK_CONFIGURATION_ID;

    #[tokio::test]
    async fn test_fresh_store_has_seeded_latest() {
        let store = MemoryConfigurationStore::new();
        let latest = store.latest().await.unwrap().expect("seeded configuration");
        assert_eq!(latest.id, 1);
        assert_eq!(latest.facts.customer_facts.name, "John Doe");
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryConfigurationStore::new();
        let a = store.create(ConfigurationFacts::default()).await.unwrap();
        let b = store.create(ConfigurationFacts::default()).await.unwrap();
        assert!(b.id > a.id, "ids must increase: {} then {}", a.id, b.id);
        assert_eq!(store.latest().await.unwrap().unwrap().id, b.id);
    }

    #[tokio::test]
    async fn test_latest_of_three_is_id_three() {
        let store = MemoryConfigurationStore::new();
        store.create(ConfigurationFacts::default()).await.unwrap();
        store.create(ConfigurationFacts::default()).await.unwrap();

        let ids: Vec<u64> = store.list().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.latest().await.unwrap().unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_unknown_id_is_none() {
        let store = MemoryConfigurationStore::new();
        let patch: ConfigurationPatch = serde_json::from_value(serde_json::json!({
            "restaurant_facts": { "name": "Renamed Bistro" }
        }))
        .unwrap();

        let updated = store.update(1, &patch).await.unwrap().unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.facts.restaurant_facts.name, "Renamed Bistro");
        assert_eq!(
            store.get(1).await.unwrap().unwrap().facts.restaurant_facts.name,
            "Renamed Bistro"
        );
        assert_eq!(store.list().await.unwrap().len(), 1, "update must not add rows");

        assert!(store.update(42, &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_creates_never_share_an_id() {
        let store = std::sync::Arc::new(MemoryConfigurationStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(ConfigurationFacts::default()).await.unwrap().id
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn test_response_create_defaults_configuration_id() {
        let store = MemoryResponseStore::new();
        let record = store
            .create(NewResponseRecord {
                feedback_text: "Lovely evening".to_string(),
                rendered_output: "Thank you!".to_string(),
                configuration_id: None,
            })
            .await
            .unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.configuration_id, FALLBACK_CONFIGURATION_ID);
        assert_eq!(store.get(1).await.unwrap(), Some(record));
        assert!(store.get(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_response_list_is_in_id_order() {
        let store = MemoryResponseStore::new();
        for text in ["first", "second"] {
            store
                .create(NewResponseRecord {
                    feedback_text: text.to_string(),
                    rendered_output: "ok".to_string(),
                    configuration_id: Some(1),
                })
                .await
                .unwrap();
        }
        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].feedback_text, "first");
        assert!(all[0].id < all[1].id);
    }
}
