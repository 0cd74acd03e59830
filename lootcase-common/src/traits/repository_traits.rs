use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::error::Error;
use crate::models::{CooldownKey, LootCase, Prize};

/// Balance store owned by the surrounding application. The reward engine
/// never touches storage directly.
#[async_trait]
pub trait BalanceRepository: Send + Sync {
    /// Creates the account with `initial` coins if it does not exist yet.
    async fn open_account(&self, subject_id: Uuid, initial: i64) -> Result<(), Error>;

    /// Fails with `Error::UnknownSubject` for accounts that were never opened.
    async fn get_balance(&self, subject_id: Uuid) -> Result<i64, Error>;

    /// Applies `delta` atomically and returns the new balance.
    async fn apply_balance_delta(&self, subject_id: Uuid, delta: i64) -> Result<i64, Error>;
}

#[async_trait]
pub trait CooldownRepository: Send + Sync {
    async fn get_last_opened(
        &self,
        subject_id: Uuid,
        key: &CooldownKey,
    ) -> Result<Option<DateTime<Utc>>, Error>;

    async fn set_last_opened(
        &self,
        subject_id: Uuid,
        key: &CooldownKey,
        at: DateTime<Utc>,
    ) -> Result<(), Error>;
}

/// Prize and case tables written by the admin editor.
///
/// Cases embed their prizes by value. Implementations keep the two tables
/// consistent: upserting a case also upserts its prizes, upserting a prize
/// refreshes every embedded copy, and deleting a prize removes it from every
/// case that referenced it.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_prizes(&self) -> Result<Vec<Prize>, Error>;
    async fn get_prize(&self, prize_id: &str) -> Result<Option<Prize>, Error>;
    async fn upsert_prize(&self, prize: &Prize) -> Result<(), Error>;
    /// Returns `false` when no prize had that id.
    async fn delete_prize(&self, prize_id: &str) -> Result<bool, Error>;

    async fn list_cases(&self) -> Result<Vec<LootCase>, Error>;
    async fn get_case(&self, case_id: &str) -> Result<Option<LootCase>, Error>;
    async fn upsert_case(&self, case: &LootCase) -> Result<(), Error>;
    async fn delete_case(&self, case_id: &str) -> Result<bool, Error>;
    async fn set_case_active(&self, case_id: &str, active: bool) -> Result<bool, Error>;
}
