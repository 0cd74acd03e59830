// File: lootcase-common/src/models/loot_case.rs

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::cooldown::MAX_COOLDOWN_SECS;
use crate::models::prize::{Prize, PrizeImage, Rarity};

/// Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlowIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl GlowIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlowIntensity::Low => "low",
            GlowIntensity::Medium => "medium",
            GlowIntensity::High => "high",
        }
    }
}

impl fmt::Display for GlowIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlowIntensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(GlowIntensity::Low),
            "medium" => Ok(GlowIntensity::Medium),
            "high" => Ok(GlowIntensity::High),
            other => Err(Error::Parse(format!("Unknown glow intensity '{}'", other))),
        }
    }
}

/// A loot container offering one random prize from its pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootCase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: PrizeImage,
    pub rarity: Rarity,
    pub color: String,

    /// Coins charged per opening. Zero for free cases.
    #[serde(default)]
    pub price: i64,

    /// `None` means the case can be opened back to back.
    #[serde(default)]
    pub cooldown_secs: Option<i64>,

    /// Ordered pool. Order decides tie-breaks in the draw.
    pub prizes: Vec<Prize>,

    pub is_active: bool,

    pub glow_color: String,
    #[serde(default)]
    pub glow_intensity: GlowIntensity,
}

impl LootCase {
    pub fn new(id: &str, name: &str, rarity: Rarity) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            image: PrizeImage::Glyph("📦".to_string()),
            rarity,
            color: rarity.default_color().to_string(),
            price: 0,
            cooldown_secs: None,
            prizes: Vec::new(),
            is_active: true,
            glow_color: rarity.default_color().to_string(),
            glow_intensity: GlowIntensity::default(),
        }
    }

    /// Ids handed out by the admin editor: `case_<unix millis>`.
    pub fn generate_id(now: DateTime<Utc>) -> String {
        format!("case_{}", now.timestamp_millis())
    }

    pub fn with_prizes(mut self, prizes: Vec<Prize>) -> Self {
        self.prizes = prizes;
        self
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    pub fn with_cooldown_secs(mut self, secs: i64) -> Self {
        self.cooldown_secs = Some(secs);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn total_weight(&self) -> f64 {
        self.prizes.iter().map(Prize::effective_weight).sum()
    }

    /// True when at least one prize carries a positive weight.
    pub fn is_drawable(&self) -> bool {
        self.total_weight() > 0.0
    }

    /// Sum of the prize values, shown as "contents worth" on the case card.
    pub fn content_value(&self) -> i64 {
        self.prizes.iter().map(|p| p.value).sum()
    }

    pub fn contains_prize(&self, prize_id: &str) -> bool {
        self.prizes.iter().any(|p| p.id == prize_id)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidCase("id must not be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidCase(format!("case '{}' has no name", self.id)));
        }
        if self.price < 0 {
            return Err(Error::InvalidCase(format!(
                "case '{}' has negative price {}",
                self.id, self.price
            )));
        }
        if let Some(secs) = self.cooldown_secs {
            if secs < 0 {
                return Err(Error::InvalidCase(format!(
                    "case '{}' has negative cooldown {}s",
                    self.id, secs
                )));
            }
            if secs > MAX_COOLDOWN_SECS {
                return Err(Error::InvalidCase(format!(
                    "case '{}' has cooldown {}s; the limit is {}s",
                    self.id, secs, MAX_COOLDOWN_SECS
                )));
            }
        }
        let mut seen = HashSet::with_capacity(self.prizes.len());
        for prize in &self.prizes {
            prize
                .validate()
                .map_err(|e| Error::InvalidCase(format!("case '{}': {}", self.id, e)))?;
            if !seen.insert(prize.id.as_str()) {
                return Err(Error::InvalidCase(format!(
                    "case '{}' lists prize '{}' more than once",
                    self.id, prize.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_ids_use_the_millisecond_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(LootCase::generate_id(at), "case_1714564800000");
    }

    #[test]
    fn drawable_needs_a_positive_weight() {
        let empty = LootCase::new("c1", "Empty", Rarity::Common);
        assert!(!empty.is_drawable());

        let zeros = LootCase::new("c2", "Zeros", Rarity::Common)
            .with_prizes(vec![Prize::new("p", "Nothing", Rarity::Common, 5, 0.0)]);
        assert!(!zeros.is_drawable());

        let ok = LootCase::new("c3", "Ok", Rarity::Common)
            .with_prizes(vec![
                Prize::new("p", "Nothing", Rarity::Common, 5, 0.0),
                Prize::new("q", "Something", Rarity::Rare, 15, 2.5),
            ]);
        assert!(ok.is_drawable());
        assert_eq!(ok.content_value(), 20);
    }

    #[test]
    fn validate_catches_bad_price_and_cooldown() {
        let bad_price = LootCase::new("c", "Case", Rarity::Rare).with_price(-1);
        assert!(matches!(bad_price.validate(), Err(Error::InvalidCase(_))));

        let bad_cd = LootCase::new("c", "Case", Rarity::Rare).with_cooldown_secs(-5);
        assert!(matches!(bad_cd.validate(), Err(Error::InvalidCase(_))));
    }

    #[test]
    fn validate_caps_the_cooldown() {
        let longest = LootCase::new("c", "Case", Rarity::Rare).with_cooldown_secs(MAX_COOLDOWN_SECS);
        assert!(longest.validate().is_ok());

        for secs in [MAX_COOLDOWN_SECS + 1, 10_000_000_000_000, i64::MAX] {
            let case = LootCase::new("c", "Case", Rarity::Rare).with_cooldown_secs(secs);
            assert!(matches!(case.validate(), Err(Error::InvalidCase(_))), "{}s accepted", secs);
        }
    }

    #[test]
    fn validate_rejects_a_prize_listed_twice() {
        let twice = LootCase::new("c", "Case", Rarity::Rare).with_prizes(vec![
            Prize::new("p", "Coins", Rarity::Common, 5, 1.0),
            Prize::new("q", "Boost", Rarity::Epic, 50, 1.0),
            Prize::new("p", "Coins again", Rarity::Common, 5, 3.0),
        ]);
        match twice.validate() {
            Err(Error::InvalidCase(msg)) => assert!(msg.contains("'p'")),
            other => panic!("expected InvalidCase, got {:?}", other),
        }
    }
}
