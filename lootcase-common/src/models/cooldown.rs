// File: lootcase-common/src/models/cooldown.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Longest cooldown a case or config may carry: ten years.
pub const MAX_COOLDOWN_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// What a cooldown timestamp is tracked against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "case_id", rename_all = "snake_case")]
pub enum CooldownKey {
    Case(String),
    FreeCase,
    FreeWheel,
}

impl CooldownKey {
    /// Storage form: `case:<id>`, `free_case` or `free_wheel`.
    pub fn as_key(&self) -> String {
        match self {
            CooldownKey::Case(id) => format!("case:{}", id),
            CooldownKey::FreeCase => "free_case".to_string(),
            CooldownKey::FreeWheel => "free_wheel".to_string(),
        }
    }
}

impl fmt::Display for CooldownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl FromStr for CooldownKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free_case" => Ok(CooldownKey::FreeCase),
            "free_wheel" => Ok(CooldownKey::FreeWheel),
            other => match other.strip_prefix("case:") {
                Some(id) if !id.is_empty() => Ok(CooldownKey::Case(id.to_string())),
                _ => Err(Error::Parse(format!("Unknown cooldown key '{}'", other))),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownRecord {
    pub subject_id: Uuid,
    pub key: CooldownKey,
    pub last_opened_at: DateTime<Utc>,
}
