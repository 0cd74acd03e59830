use async_trait::async_trait;
use tokio::sync::RwLock;

use lootcase_common::error::Error;
use lootcase_common::models::{LootCase, Prize};
use lootcase_common::traits::repository_traits::CatalogRepository;

/// Insertion-ordered tables, matching the order the admin created things in.
#[derive(Debug, Default)]
struct Tables {
    prizes: Vec<Prize>,
    cases: Vec<LootCase>,
}

impl Tables {
    fn put_prize(&mut self, prize: &Prize) {
        match self.prizes.iter_mut().find(|p| p.id == prize.id) {
            Some(existing) => *existing = prize.clone(),
            None => self.prizes.push(prize.clone()),
        }
        for case in &mut self.cases {
            for embedded in case.prizes.iter_mut().filter(|p| p.id == prize.id) {
                *embedded = prize.clone();
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCatalogRepository {
    tables: RwLock<Tables>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_prizes(&self) -> Result<Vec<Prize>, Error> {
        Ok(self.tables.read().await.prizes.clone())
    }

    async fn get_prize(&self, prize_id: &str) -> Result<Option<Prize>, Error> {
        Ok(self
            .tables
            .read()
            .await
            .prizes
            .iter()
            .find(|p| p.id == prize_id)
            .cloned())
    }

    async fn upsert_prize(&self, prize: &Prize) -> Result<(), Error> {
        self.tables.write().await.put_prize(prize);
        Ok(())
    }

    async fn delete_prize(&self, prize_id: &str) -> Result<bool, Error> {
        let mut tables = self.tables.write().await;
        let before = tables.prizes.len();
        tables.prizes.retain(|p| p.id != prize_id);
        let existed = tables.prizes.len() != before;

        for case in &mut tables.cases {
            case.prizes.retain(|p| p.id != prize_id);
        }
        Ok(existed)
    }

    async fn list_cases(&self) -> Result<Vec<LootCase>, Error> {
        Ok(self.tables.read().await.cases.clone())
    }

    async fn get_case(&self, case_id: &str) -> Result<Option<LootCase>, Error> {
        Ok(self
            .tables
            .read()
            .await
            .cases
            .iter()
            .find(|c| c.id == case_id)
            .cloned())
    }

    async fn upsert_case(&self, case: &LootCase) -> Result<(), Error> {
        let mut tables = self.tables.write().await;
        for prize in &case.prizes {
            tables.put_prize(prize);
        }
        match tables.cases.iter_mut().find(|c| c.id == case.id) {
            Some(existing) => *existing = case.clone(),
            None => tables.cases.push(case.clone()),
        }
        Ok(())
    }

    async fn delete_case(&self, case_id: &str) -> Result<bool, Error> {
        let mut tables = self.tables.write().await;
        let before = tables.cases.len();
        tables.cases.retain(|c| c.id != case_id);
        Ok(tables.cases.len() != before)
    }

    async fn set_case_active(&self, case_id: &str, active: bool) -> Result<bool, Error> {
        let mut tables = self.tables.write().await;
        match tables.cases.iter_mut().find(|c| c.id == case_id) {
            Some(case) => {
                case.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
