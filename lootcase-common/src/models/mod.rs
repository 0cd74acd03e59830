// File: lootcase-common/src/models/mod.rs
pub mod prize;
pub mod loot_case;
pub mod cooldown;
pub mod reward;

pub use prize::{Prize, PrizeImage, PrizeKind, Rarity};
pub use loot_case::{GlowIntensity, LootCase};
pub use cooldown::{CooldownKey, CooldownRecord, MAX_COOLDOWN_SECS};
pub use reward::{DrawnPrize, RewardOutcome};
