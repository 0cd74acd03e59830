//! lootcase-server/src/context.rs
//!
//! Wires stores, clock, random source and services for one command run.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use lootcase_common::traits::{
    BalanceRepository, CatalogRepository, Clock, CooldownRepository, RandomSource,
};
use lootcase_core::clock::SystemClock;
use lootcase_core::config::RewardConfig;
use lootcase_core::draw::{SeededRandom, ThreadRandom};
use lootcase_core::repositories::{
    InMemoryBalanceRepository, InMemoryCatalogRepository, InMemoryCooldownRepository,
    PostgresBalanceRepository, PostgresCatalogRepository, PostgresCooldownRepository,
};
use lootcase_core::services::{CatalogService, RewardService};
use lootcase_core::{Database, DbSettings, Error};

use crate::Args;

pub struct AppContext {
    pub subject_id: Uuid,
    pub catalog: Arc<CatalogService>,
    pub rewards: Arc<RewardService>,
    pub balances: Arc<dyn BalanceRepository + Send + Sync>,
    pub rng: Arc<dyn RandomSource>,
}

struct Stores {
    catalog: Arc<dyn CatalogRepository + Send + Sync>,
    balances: Arc<dyn BalanceRepository + Send + Sync>,
    cooldowns: Arc<dyn CooldownRepository + Send + Sync>,
}

impl AppContext {
    pub async fn new(args: &Args) -> Result<Self, Error> {
        let config = match &args.config {
            Some(path) => {
                info!("Loading reward config from {}", path.display());
                RewardConfig::from_file(path)?
            }
            None => RewardConfig::default(),
        };

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let rng: Arc<dyn RandomSource> = match args.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };

        let stores = match &args.database_url {
            Some(url) => {
                let settings = DbSettings::new(url.as_str()).with_max_connections(args.db_max_connections);
                let db = Database::connect(&settings).await?;
                db.migrate().await?;
                Stores {
                    catalog: Arc::new(PostgresCatalogRepository::new(db.pool().clone())),
                    balances: Arc::new(PostgresBalanceRepository::new(db.pool().clone())),
                    cooldowns: Arc::new(PostgresCooldownRepository::new(db.pool().clone())),
                }
            }
            None => {
                warn!("No DATABASE_URL => using in-memory stores; nothing is persisted");
                Stores {
                    catalog: Arc::new(InMemoryCatalogRepository::new()),
                    balances: Arc::new(InMemoryBalanceRepository::new()),
                    cooldowns: Arc::new(InMemoryCooldownRepository::new()),
                }
            }
        };

        let catalog = Arc::new(CatalogService::new(stores.catalog, clock.clone()));
        if args.database_url.is_none() {
            catalog.seed_default_catalog().await?;
        }

        stores.balances.open_account(args.subject, args.starting_balance).await?;

        let rewards = Arc::new(RewardService::new(
            catalog.clone(),
            stores.balances.clone(),
            stores.cooldowns,
            clock,
            rng.clone(),
            config,
        ));

        Ok(Self {
            subject_id: args.subject,
            catalog,
            rewards,
            balances: stores.balances,
            rng,
        })
    }
}
