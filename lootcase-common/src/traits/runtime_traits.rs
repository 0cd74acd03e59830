use chrono::{DateTime, Utc};

/// Wall clock, injectable so cooldowns can be tested without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_uniform(&self) -> f64;
}
