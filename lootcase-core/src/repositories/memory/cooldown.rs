use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use lootcase_common::error::Error;
use lootcase_common::models::{CooldownKey, CooldownRecord};
use lootcase_common::traits::repository_traits::CooldownRepository;

#[derive(Debug, Default)]
pub struct InMemoryCooldownRepository {
    last_opened: RwLock<HashMap<(Uuid, CooldownKey), DateTime<Utc>>>,
}

impl InMemoryCooldownRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, mostly for tests and the CLI.
    pub async fn records(&self) -> Vec<CooldownRecord> {
        self.last_opened
            .read()
            .await
            .iter()
            .map(|((subject_id, key), at)| CooldownRecord {
                subject_id: *subject_id,
                key: key.clone(),
                last_opened_at: *at,
            })
            .collect()
    }
}

#[async_trait]
impl CooldownRepository for InMemoryCooldownRepository {
    async fn get_last_opened(
        &self,
        subject_id: Uuid,
        key: &CooldownKey,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        Ok(self
            .last_opened
            .read()
            .await
            .get(&(subject_id, key.clone()))
            .copied())
    }

    async fn set_last_opened(
        &self,
        subject_id: Uuid,
        key: &CooldownKey,
        at: DateTime<Utc>,
    ) -> Result<(), Error> {
        self.last_opened
            .write()
            .await
            .insert((subject_id, key.clone()), at);
        Ok(())
    }
}
