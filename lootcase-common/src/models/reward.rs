// File: lootcase-common/src/models/reward.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cooldown::CooldownKey;
use crate::models::prize::{Prize, PrizeKind, Rarity};

/// What a single draw produced, whether it came from a case pool or from a
/// fixed coin table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnPrize {
    /// `None` for coin-table draws, which have no catalog entry.
    pub prize_id: Option<String>,
    pub name: String,
    pub rarity: Rarity,
    pub kind: PrizeKind,
    pub value: i64,
}

impl DrawnPrize {
    pub fn coins(amount: i64, rarity: Rarity) -> Self {
        Self {
            prize_id: None,
            name: format!("{} coins", amount),
            rarity,
            kind: PrizeKind::Coins,
            value: amount,
        }
    }

    pub fn coin_value(&self) -> i64 {
        match self.kind {
            PrizeKind::Coins => self.value,
            PrizeKind::Experience | PrizeKind::Item => 0,
        }
    }
}

impl From<&Prize> for DrawnPrize {
    fn from(prize: &Prize) -> Self {
        Self {
            prize_id: Some(prize.id.clone()),
            name: prize.name.clone(),
            rarity: prize.rarity,
            kind: prize.kind,
            value: prize.value,
        }
    }
}

/// Result screen payload for one committed draw. Ephemeral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardOutcome {
    pub subject_id: Uuid,
    pub source: CooldownKey,
    pub prize: DrawnPrize,
    /// Net change applied to the balance (winnings minus price).
    pub balance_delta: i64,
    pub new_balance: i64,
    pub opened_at: DateTime<Utc>,
    pub next_available_at: Option<DateTime<Utc>>,
}
