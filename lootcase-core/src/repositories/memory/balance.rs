use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use lootcase_common::error::Error;
use lootcase_common::traits::repository_traits::BalanceRepository;

#[derive(Debug, Default)]
pub struct InMemoryBalanceRepository {
    balances: RwLock<HashMap<Uuid, i64>>,
}

impl InMemoryBalanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BalanceRepository for InMemoryBalanceRepository {
    async fn open_account(&self, subject_id: Uuid, initial: i64) -> Result<(), Error> {
        self.balances.write().await.entry(subject_id).or_insert(initial);
        Ok(())
    }

    async fn get_balance(&self, subject_id: Uuid) -> Result<i64, Error> {
        self.balances
            .read()
            .await
            .get(&subject_id)
            .copied()
            .ok_or(Error::UnknownSubject(subject_id))
    }

    async fn apply_balance_delta(&self, subject_id: Uuid, delta: i64) -> Result<i64, Error> {
        let mut balances = self.balances.write().await;
        let balance = balances
            .get_mut(&subject_id)
            .ok_or(Error::UnknownSubject(subject_id))?;
        *balance = balance.saturating_add(delta);
        Ok(*balance)
    }
}
