use std::sync::Arc;
use chrono::Duration;
use tracing::{debug, info, warn};
use lootcase_common::models::{LootCase, Prize};
use lootcase_common::traits::{CatalogRepository, Clock};
use crate::Error;
use crate::seed;

/// Admin editor over the prize and case tables, plus the read side the
/// reward engine consumes.
pub struct CatalogService {
    catalog_repo: Arc<dyn CatalogRepository + Send + Sync>,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(
        catalog_repo: Arc<dyn CatalogRepository + Send + Sync>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { catalog_repo, clock }
    }

    // ------------------------------------------------------------------
    // Read side used by the shop and the draw engine
    // ------------------------------------------------------------------

    /// Active cases that can actually be drawn from. An active case whose
    /// pool is empty or all-zero is held back and reported.
    pub async fn list_active_cases(&self) -> Result<Vec<LootCase>, Error> {
        let cases = self.catalog_repo.list_cases().await?;
        let mut offered = Vec::with_capacity(cases.len());
        for case in cases.into_iter().filter(|c| c.is_active) {
            if case.is_drawable() {
                offered.push(case);
            } else {
                warn!(
                    "Case '{}' ({}) is active but has no drawable prizes => hidden from the shop",
                    case.name, case.id
                );
            }
        }
        Ok(offered)
    }

    pub async fn prizes_of(&self, case_id: &str) -> Result<Vec<Prize>, Error> {
        self.get_case(case_id).await.map(|c| c.prizes)
    }

    pub async fn get_case(&self, case_id: &str) -> Result<LootCase, Error> {
        self.catalog_repo
            .get_case(case_id)
            .await?
            .ok_or_else(|| Error::UnknownCase(case_id.to_string()))
    }

    // ------------------------------------------------------------------
    // Admin CRUD
    // ------------------------------------------------------------------

    pub async fn list_prizes(&self) -> Result<Vec<Prize>, Error> {
        self.catalog_repo.list_prizes().await
    }

    pub async fn list_cases(&self) -> Result<Vec<LootCase>, Error> {
        self.catalog_repo.list_cases().await
    }

    /// Full replace by id. Cases holding this prize see the new version.
    pub async fn upsert_prize(&self, prize: Prize) -> Result<Prize, Error> {
        prize.validate()?;
        self.catalog_repo.upsert_prize(&prize).await?;
        debug!("Upserted prize '{}' ({})", prize.name, prize.id);
        Ok(prize)
    }

    /// Creates a prize; an empty id is replaced by `prize_<millis>`.
    pub async fn create_prize(&self, mut prize: Prize) -> Result<Prize, Error> {
        if prize.id.trim().is_empty() {
            prize.id = self.free_id("prize").await?;
        }
        self.upsert_prize(prize).await
    }

    /// Removes the prize and drops it from every case that held it.
    pub async fn delete_prize(&self, prize_id: &str) -> Result<(), Error> {
        if !self.catalog_repo.delete_prize(prize_id).await? {
            return Err(Error::NotFound(format!("prize '{}'", prize_id)));
        }
        info!("Deleted prize '{}' and removed it from all cases", prize_id);
        Ok(())
    }

    pub async fn upsert_case(&self, case: LootCase) -> Result<LootCase, Error> {
        case.validate()?;
        self.catalog_repo.upsert_case(&case).await?;
        if case.is_active && !case.is_drawable() {
            warn!("Case '{}' saved as active without drawable prizes", case.id);
        }
        debug!("Upserted case '{}' ({})", case.name, case.id);
        Ok(case)
    }

    /// Creates a case; an empty id is replaced by `case_<millis>`.
    pub async fn create_case(&self, mut case: LootCase) -> Result<LootCase, Error> {
        if case.id.trim().is_empty() {
            case.id = self.free_id("case").await?;
        }
        self.upsert_case(case).await
    }

    pub async fn delete_case(&self, case_id: &str) -> Result<(), Error> {
        if !self.catalog_repo.delete_case(case_id).await? {
            return Err(Error::NotFound(format!("case '{}'", case_id)));
        }
        info!("Deleted case '{}'", case_id);
        Ok(())
    }

    pub async fn set_case_active(&self, case_id: &str, active: bool) -> Result<(), Error> {
        if !self.catalog_repo.set_case_active(case_id, active).await? {
            return Err(Error::NotFound(format!("case '{}'", case_id)));
        }
        info!("Case '{}' is_active={}", case_id, active);
        Ok(())
    }

    /// Loads the bundled mock catalog into an empty store. Returns the number
    /// of cases written (0 when the catalog already had content).
    pub async fn seed_default_catalog(&self) -> Result<usize, Error> {
        let has_cases = !self.catalog_repo.list_cases().await?.is_empty();
        let has_prizes = !self.catalog_repo.list_prizes().await?.is_empty();
        if has_cases || has_prizes {
            debug!("Catalog already populated => skipping seed");
            return Ok(0);
        }

        for prize in seed::default_prizes() {
            self.upsert_prize(prize).await?;
        }
        let cases = seed::default_cases();
        let count = cases.len();
        for case in cases {
            self.upsert_case(case).await?;
        }
        info!("Seeded default catalog with {} cases", count);
        Ok(count)
    }

    /// `<prefix>_<millis>`, bumped by a millisecond until nothing uses it.
    async fn free_id(&self, prefix: &str) -> Result<String, Error> {
        let mut at = self.clock.now();
        loop {
            let id = match prefix {
                "case" => LootCase::generate_id(at),
                _ => format!("{}_{}", prefix, at.timestamp_millis()),
            };
            let taken = match prefix {
                "case" => self.catalog_repo.get_case(&id).await?.is_some(),
                _ => self.catalog_repo.get_prize(&id).await?.is_some(),
            };
            if !taken {
                return Ok(id);
            }
            at += Duration::milliseconds(1);
        }
    }
}
