use std::sync::Arc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use lootcase_common::models::{CooldownKey, DrawnPrize, LootCase, RewardOutcome};
use lootcase_common::traits::{BalanceRepository, Clock, CooldownRepository, RandomSource};
use crate::config::RewardConfig;
use crate::cooldown::{CooldownGate, GateState};
use crate::draw::{self, TierTable};
use crate::services::catalog_service::CatalogService;
use crate::Error;

/// Above this many idle entries the per-subject lock map gets pruned.
const LOCK_PRUNE_THRESHOLD: usize = 1000;

enum DrawPool<'a> {
    Case(&'a LootCase),
    Table(&'a TierTable),
}

/// Everything one opening needs, resolved before the critical section.
struct Attempt<'a> {
    key: CooldownKey,
    gate: CooldownGate,
    price: i64,
    pool: DrawPool<'a>,
}

/// A stored case whose cooldown cannot be represented is refused as invalid.
fn case_gate(case: &LootCase) -> Result<CooldownGate, Error> {
    CooldownGate::from_secs(case.cooldown_secs)
        .map_err(|e| Error::InvalidCase(format!("case '{}': {}", case.id, e)))
}

/// Couples gate check, draw, balance delta and cooldown write into one unit
/// of work per subject.
pub struct RewardService {
    catalog: Arc<CatalogService>,
    balance_repo: Arc<dyn BalanceRepository + Send + Sync>,
    cooldown_repo: Arc<dyn CooldownRepository + Send + Sync>,
    clock: Arc<dyn Clock>,
    rng: Arc<dyn RandomSource>,
    config: RewardConfig,

    /// Serialises openings per subject so two requests cannot both pass the
    /// gate before either commits.
    subject_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl RewardService {
    pub fn new(
        catalog: Arc<CatalogService>,
        balance_repo: Arc<dyn BalanceRepository + Send + Sync>,
        cooldown_repo: Arc<dyn CooldownRepository + Send + Sync>,
        clock: Arc<dyn Clock>,
        rng: Arc<dyn RandomSource>,
        config: RewardConfig,
    ) -> Self {
        debug!("Initializing RewardService");
        Self {
            catalog,
            balance_repo,
            cooldown_repo,
            clock,
            rng,
            config,
            subject_locks: DashMap::new(),
        }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Opens a catalog case: charges its price and credits the drawn prize
    /// as one balance delta.
    pub async fn open_case(&self, subject_id: Uuid, case_id: &str) -> Result<RewardOutcome, Error> {
        let case = self.catalog.get_case(case_id).await?;
        if !case.is_active {
            debug!("Case '{}' is inactive => refusing to open", case.id);
            return Err(Error::UnknownCase(case_id.to_string()));
        }

        let attempt = Attempt {
            key: CooldownKey::Case(case.id.clone()),
            gate: case_gate(&case)?,
            price: case.price,
            pool: DrawPool::Case(&case),
        };
        self.commit(subject_id, attempt).await
    }

    pub async fn open_free_case(&self, subject_id: Uuid) -> Result<RewardOutcome, Error> {
        let attempt = Attempt {
            key: CooldownKey::FreeCase,
            gate: self.config.free_case_gate()?,
            price: 0,
            pool: DrawPool::Table(&self.config.free_case_table),
        };
        self.commit(subject_id, attempt).await
    }

    pub async fn spin_free_wheel(&self, subject_id: Uuid) -> Result<RewardOutcome, Error> {
        let attempt = Attempt {
            key: CooldownKey::FreeWheel,
            gate: self.config.free_wheel_gate()?,
            price: 0,
            pool: DrawPool::Table(&self.config.free_wheel_table),
        };
        self.commit(subject_id, attempt).await
    }

    /// Current gate state for display. Never writes.
    pub async fn cooldown_status(&self, subject_id: Uuid, key: &CooldownKey) -> Result<GateState, Error> {
        let gate = self.gate_for(key).await?;
        let last = self.cooldown_repo.get_last_opened(subject_id, key).await?;
        Ok(gate.state(last, self.clock.now()))
    }

    async fn gate_for(&self, key: &CooldownKey) -> Result<CooldownGate, Error> {
        match key {
            CooldownKey::Case(case_id) => {
                let case = self.catalog.get_case(case_id).await?;
                case_gate(&case)
            }
            CooldownKey::FreeCase => self.config.free_case_gate(),
            CooldownKey::FreeWheel => self.config.free_wheel_gate(),
        }
    }

    fn subject_lock(&self, subject_id: Uuid) -> Arc<Mutex<()>> {
        if self.subject_locks.len() > LOCK_PRUNE_THRESHOLD {
            self.subject_locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        self.subject_locks
            .entry(subject_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Any error before the balance write leaves no trace. A failed cooldown
    /// write after the balance write is compensated.
    async fn commit(&self, subject_id: Uuid, attempt: Attempt<'_>) -> Result<RewardOutcome, Error> {
        let lock = self.subject_lock(subject_id);
        let _guard = lock.lock().await;

        let now = self.clock.now();
        let last_opened = self.cooldown_repo.get_last_opened(subject_id, &attempt.key).await?;
        if let Err(e) = attempt.gate.check(last_opened, now) {
            debug!("Subject {} blocked on {}: {}", subject_id, attempt.key, e);
            return Err(e);
        }
        let next_available_at = attempt.gate.next_available_at(now)?;

        let balance = self.balance_repo.get_balance(subject_id).await?;
        if attempt.price > 0 && attempt.price > balance {
            debug!(
                "Subject {} cannot afford {} (balance={}, price={})",
                subject_id, attempt.key, balance, attempt.price
            );
            return Err(Error::InsufficientBalance { balance, price: attempt.price });
        }

        let drawn = match attempt.pool {
            DrawPool::Case(case) => draw::draw_prize(case, &*self.rng).map(DrawnPrize::from),
            DrawPool::Table(table) => table.draw(&*self.rng, &attempt.key.as_key()),
        };
        let prize = match drawn {
            Ok(p) => p,
            Err(e) => {
                warn!("Draw for {} failed, attempt voided: {}", attempt.key, e);
                return Err(e);
            }
        };

        let delta = prize.coin_value().saturating_sub(attempt.price);
        let new_balance = self.balance_repo.apply_balance_delta(subject_id, delta).await?;

        if let Err(e) = self.cooldown_repo.set_last_opened(subject_id, &attempt.key, now).await {
            self.compensate(subject_id, delta).await;
            return Err(e);
        }

        info!(
            "Subject {} opened {} => '{}' ({}, {} {}), delta={}, balance={}",
            subject_id, attempt.key, prize.name, prize.rarity, prize.value, prize.kind, delta, new_balance
        );

        Ok(RewardOutcome {
            subject_id,
            source: attempt.key,
            prize,
            balance_delta: delta,
            new_balance,
            opened_at: now,
            next_available_at,
        })
    }

    async fn compensate(&self, subject_id: Uuid, delta: i64) {
        if delta == 0 {
            return;
        }
        match self.balance_repo.apply_balance_delta(subject_id, -delta).await {
            Ok(balance) => warn!(
                "Cooldown write failed for subject {} => reverted delta {} (balance={})",
                subject_id, delta, balance
            ),
            Err(e) => error!(
                "Cooldown write failed for subject {} and reverting delta {} also failed: {:?}",
                subject_id, delta, e
            ),
        }
    }
}
