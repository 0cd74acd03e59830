use serde::{Deserialize, Serialize};

use lootcase_common::models::{DrawnPrize, Rarity};
use lootcase_common::traits::RandomSource;
use crate::Error;

/// One band of a fixed coin table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierEntry {
    pub coins: i64,
    /// Width of the band in percent.
    pub percent: f64,
    pub rarity: Rarity,
}

impl TierEntry {
    pub fn new(coins: i64, percent: f64, rarity: Rarity) -> Self {
        Self { coins, percent, rarity }
    }
}

/// Tiered variant used by the free case and the free wheel.
///
/// Bands are cumulative thresholds over `[0, 100)` in table order. The last
/// band is an unconditional fallback, so the draw stays total even when the
/// bands do not add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    entries: Vec<TierEntry>,
}

impl TierTable {
    pub fn new(entries: Vec<TierEntry>) -> Self {
        Self { entries }
    }

    pub fn free_case() -> Self {
        Self::new(vec![
            TierEntry::new(10, 40.0, Rarity::Common),
            TierEntry::new(30, 30.0, Rarity::Rare),
            TierEntry::new(50, 15.0, Rarity::Epic),
            TierEntry::new(100, 10.0, Rarity::Legendary),
            TierEntry::new(250, 5.0, Rarity::Mythic),
        ])
    }

    pub fn free_wheel() -> Self {
        Self::new(vec![
            TierEntry::new(5, 35.0, Rarity::Common),
            TierEntry::new(15, 30.0, Rarity::Common),
            TierEntry::new(25, 20.0, Rarity::Rare),
            TierEntry::new(50, 10.0, Rarity::Epic),
            TierEntry::new(100, 5.0, Rarity::Legendary),
        ])
    }

    pub fn entries(&self) -> &[TierEntry] {
        &self.entries
    }

    pub fn select(&self, unit: f64) -> Option<&TierEntry> {
        let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
        let r = unit * 100.0;

        let mut upper = 0.0;
        for entry in &self.entries {
            upper += entry.percent.max(0.0);
            if upper > r {
                return Some(entry);
            }
        }
        self.entries.last()
    }

    pub fn draw(&self, rng: &dyn RandomSource, pool_name: &str) -> Result<DrawnPrize, Error> {
        self.select(rng.next_uniform())
            .map(|entry| DrawnPrize::coins(entry.coins, entry.rarity))
            .ok_or_else(|| Error::EmptyPool(pool_name.to_string()))
    }
}
