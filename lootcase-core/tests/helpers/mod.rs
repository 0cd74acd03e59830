// File: lootcase-core/tests/helpers/mod.rs
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use lootcase_core::clock::ManualClock;
use lootcase_core::config::RewardConfig;
use lootcase_core::models::{LootCase, Prize, Rarity};
use lootcase_core::repositories::{
    InMemoryBalanceRepository, InMemoryCatalogRepository, InMemoryCooldownRepository,
};
use lootcase_core::services::{CatalogService, RewardService};
use lootcase_core::test_utils::ScriptedRandom;
use lootcase_core::traits::BalanceRepository;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

/// Case with prizes `a` (weight 40) and `b` (weight 60).
pub fn forty_sixty_case(id: &str) -> LootCase {
    LootCase::new(id, "Forty Sixty", Rarity::Rare).with_prizes(vec![
        Prize::new("a", "Prize A", Rarity::Common, 10, 40.0),
        Prize::new("b", "Prize B", Rarity::Rare, 20, 60.0),
    ])
}

pub struct Harness {
    pub subject: Uuid,
    pub clock: Arc<ManualClock>,
    pub rng: Arc<ScriptedRandom>,
    pub balances: Arc<InMemoryBalanceRepository>,
    pub cooldowns: Arc<InMemoryCooldownRepository>,
    pub catalog: Arc<CatalogService>,
    pub rewards: RewardService,
}

pub async fn harness(samples: &[f64], initial_balance: i64) -> Harness {
    let subject = Uuid::new_v4();
    let clock = Arc::new(ManualClock::new(t0()));
    let rng = Arc::new(ScriptedRandom::new(samples));
    let balances = Arc::new(InMemoryBalanceRepository::new());
    let cooldowns = Arc::new(InMemoryCooldownRepository::new());
    let catalog_repo = Arc::new(InMemoryCatalogRepository::new());

    balances.open_account(subject, initial_balance).await.unwrap();

    let catalog = Arc::new(CatalogService::new(catalog_repo, clock.clone()));
    let rewards = RewardService::new(
        catalog.clone(),
        balances.clone(),
        cooldowns.clone(),
        clock.clone(),
        rng.clone(),
        RewardConfig::default(),
    );

    Harness {
        subject,
        clock,
        rng,
        balances,
        cooldowns,
        catalog,
        rewards,
    }
}
