use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cooldown::CooldownGate;
use crate::draw::TierTable;
use crate::models::MAX_COOLDOWN_SECS;
use crate::Error;

/// Settings for the free draws. Every field falls back to its default when
/// missing from the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_cooldown_hours")]
    pub free_case_cooldown_hours: i64,
    #[serde(default = "default_cooldown_hours")]
    pub free_wheel_cooldown_hours: i64,
    #[serde(default = "TierTable::free_case")]
    pub free_case_table: TierTable,
    #[serde(default = "TierTable::free_wheel")]
    pub free_wheel_table: TierTable,
}

fn default_cooldown_hours() -> i64 {
    24
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            free_case_cooldown_hours: default_cooldown_hours(),
            free_wheel_cooldown_hours: default_cooldown_hours(),
            free_case_table: TierTable::free_case(),
            free_wheel_table: TierTable::free_wheel(),
        }
    }
}

impl RewardConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: RewardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.free_case_cooldown_hours < 0 || self.free_wheel_cooldown_hours < 0 {
            return Err(Error::Parse("cooldown hours must not be negative".to_string()));
        }
        let max_hours = MAX_COOLDOWN_SECS / 3600;
        if self.free_case_cooldown_hours > max_hours || self.free_wheel_cooldown_hours > max_hours {
            return Err(Error::Parse(format!("cooldown hours must not exceed {}", max_hours)));
        }
        for (name, table) in [("free_case_table", &self.free_case_table), ("free_wheel_table", &self.free_wheel_table)] {
            if table.entries().is_empty() {
                return Err(Error::EmptyPool(name.to_string()));
            }
            if table.entries().iter().any(|e| !e.percent.is_finite() || e.percent < 0.0) {
                return Err(Error::Parse(format!("{} has a negative or non-finite band", name)));
            }
        }
        Ok(())
    }

    pub fn free_case_gate(&self) -> Result<CooldownGate, Error> {
        CooldownGate::hours(self.free_case_cooldown_hours)
    }

    pub fn free_wheel_gate(&self) -> Result<CooldownGate, Error> {
        CooldownGate::hours(self.free_wheel_cooldown_hours)
    }
}
