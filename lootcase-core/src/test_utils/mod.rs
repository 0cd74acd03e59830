// File: lootcase-core/src/test_utils/mod.rs

use std::collections::VecDeque;

use parking_lot::Mutex;
use sqlx::{Pool, Postgres};

use lootcase_common::traits::RandomSource;
use crate::{Database, Error};

/// Replays a fixed list of samples, then keeps returning the last one.
#[derive(Debug)]
pub struct ScriptedRandom {
    samples: Mutex<VecDeque<f64>>,
    last: Mutex<f64>,
}

impl ScriptedRandom {
    pub fn new(samples: &[f64]) -> Self {
        Self {
            samples: Mutex::new(samples.iter().copied().collect()),
            last: Mutex::new(samples.last().copied().unwrap_or(0.0)),
        }
    }

    pub fn constant(sample: f64) -> Self {
        Self::new(&[sample])
    }

    /// Samples not yet handed out.
    pub fn remaining(&self) -> usize {
        self.samples.lock().len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_uniform(&self) -> f64 {
        match self.samples.lock().pop_front() {
            Some(x) => x,
            None => *self.last.lock(),
        }
    }
}

/// `TEST_DATABASE_URL`, else `postgres://lootcase@localhost/lootcase_test`.
pub fn test_database_url() -> String {
    std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://lootcase@localhost/lootcase_test".to_string())
}

/// Wipes out test data so each test can start fresh.
pub async fn clean_database(pool: &Pool<Postgres>) -> Result<(), Error> {
    sqlx::query(r#"
        TRUNCATE TABLE
            case_prizes,
            loot_cases,
            prizes,
            cooldowns,
            balances
        CASCADE
    "#)
        .execute(pool)
        .await?;
    Ok(())
}

/// Connects, applies migrations and truncates every table.
pub async fn setup_test_database() -> Result<Database, Error> {
    let db = Database::new(&test_database_url()).await?;
    db.migrate().await?;
    clean_database(db.pool()).await?;
    Ok(db)
}
