// File: lootcase-common/src/models/prize.rs

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Rarity tiers, ordered ascending by scarcity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }

    /// Accent colour a new prize or case of this rarity starts with.
    pub fn default_color(&self) -> &'static str {
        match self {
            Rarity::Common => "#9CA3AF",
            Rarity::Rare => "#3B82F6",
            Rarity::Epic => "#8B5CF6",
            Rarity::Legendary => "#F59E0B",
            Rarity::Mythic => "#EF4444",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            "mythic" => Ok(Rarity::Mythic),
            other => Err(Error::Parse(format!("Unknown rarity '{}'", other))),
        }
    }
}

/// How Reward Application interprets a prize's `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeKind {
    #[default]
    Coins,
    Experience,
    Item,
}

impl PrizeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrizeKind::Coins => "coins",
            PrizeKind::Experience => "experience",
            PrizeKind::Item => "item",
        }
    }
}

impl fmt::Display for PrizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrizeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coins" => Ok(PrizeKind::Coins),
            "experience" => Ok(PrizeKind::Experience),
            "item" => Ok(PrizeKind::Item),
            other => Err(Error::Parse(format!("Unknown prize kind '{}'", other))),
        }
    }
}

/// Display asset for prizes and cases.
///
/// The admin form hands us a single string that may be an emoji, a URL or a
/// `data:` URL. It is classified once by [`PrizeImage::ingest`] and kept typed
/// from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PrizeImage {
    Glyph(String),
    ImageRef(String),
    InlineImage { mime: String, bytes: Vec<u8> },
}

impl PrizeImage {
    pub fn ingest(raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();

        if let Some(rest) = raw.strip_prefix("data:") {
            return decode_data_url(rest);
        }

        if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with('/') {
            return Ok(PrizeImage::ImageRef(raw.to_string()));
        }

        Ok(PrizeImage::Glyph(raw.to_string()))
    }

    /// Stored next to `to_source_string` so reads do not have to guess.
    pub fn kind_str(&self) -> &'static str {
        match self {
            PrizeImage::Glyph(_) => "glyph",
            PrizeImage::ImageRef(_) => "image_ref",
            PrizeImage::InlineImage { .. } => "inline_image",
        }
    }

    /// Rebuilds a stored image from its `kind_str` tag; the text is taken as-is.
    pub fn from_stored(kind: &str, raw: &str) -> Result<Self, Error> {
        match kind {
            "glyph" => Ok(PrizeImage::Glyph(raw.to_string())),
            "image_ref" => Ok(PrizeImage::ImageRef(raw.to_string())),
            "inline_image" => {
                let rest = raw
                    .strip_prefix("data:")
                    .ok_or_else(|| Error::Parse("stored inline image is not a data URL".to_string()))?;
                decode_data_url(rest)
            }
            other => Err(Error::Parse(format!("unknown image kind '{}'", other))),
        }
    }

    /// Inverse of `ingest`; used for storage columns and the admin form.
    pub fn to_source_string(&self) -> String {
        match self {
            PrizeImage::Glyph(g) => g.clone(),
            PrizeImage::ImageRef(url) => url.clone(),
            PrizeImage::InlineImage { mime, bytes } => {
                format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
            }
        }
    }
}

/// `rest` is everything after `data:`.
fn decode_data_url(rest: &str) -> Result<PrizeImage, Error> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::Parse("data URL without payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::Parse(format!("data URL is not base64: '{}'", header)))?;
    let bytes = STANDARD.decode(payload)?;
    Ok(PrizeImage::InlineImage {
        mime: mime.to_string(),
        bytes,
    })
}

impl Default for PrizeImage {
    fn default() -> Self {
        PrizeImage::Glyph("🎁".to_string())
    }
}

/// A single possible reward outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: PrizeImage,
    pub rarity: Rarity,
    pub color: String,
    pub value: i64,
    /// Relative weight inside whatever pool the prize is placed in.
    pub drop_chance: f64,
    #[serde(default)]
    pub kind: PrizeKind,
}

impl Prize {
    pub fn new(id: &str, name: &str, rarity: Rarity, value: i64, drop_chance: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            image: PrizeImage::default(),
            rarity,
            color: rarity.default_color().to_string(),
            value,
            drop_chance,
            kind: PrizeKind::Coins,
        }
    }

    pub fn with_kind(mut self, kind: PrizeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_image(mut self, image: PrizeImage) -> Self {
        self.image = image;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Coins credited when this prize is drawn.
    pub fn coin_value(&self) -> i64 {
        match self.kind {
            PrizeKind::Coins => self.value,
            PrizeKind::Experience | PrizeKind::Item => 0,
        }
    }

    /// Weight that actually takes part in a draw.
    pub fn effective_weight(&self) -> f64 {
        if self.drop_chance.is_finite() && self.drop_chance > 0.0 {
            self.drop_chance
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidPrize("id must not be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidPrize(format!("prize '{}' has no name", self.id)));
        }
        if !self.drop_chance.is_finite() || self.drop_chance < 0.0 {
            return Err(Error::InvalidPrize(format!(
                "prize '{}' has drop_chance {}; expected a finite value >= 0",
                self.id, self.drop_chance
            )));
        }
        Ok(())
    }
}
