//! Weighted random selection.
//!
//! Every draw is a pure function of the pool and one sample from a
//! [`RandomSource`]. Pools are walked in their stored order and the first
//! entry whose cumulative weight is strictly greater than the scaled sample
//! wins, so order decides tie-breaks.

pub mod random;
pub mod table;

pub use random::{SeededRandom, ThreadRandom};
pub use table::{TierEntry, TierTable};

use lootcase_common::models::{LootCase, Prize};
use lootcase_common::traits::RandomSource;
use crate::Error;

/// Picks an index into `weights` for a uniform sample `unit` in `[0, 1)`.
///
/// Non-positive and non-finite weights take no probability mass. Returns
/// `None` when nothing carries weight.
pub fn select_index(weights: &[f64], unit: f64) -> Option<usize> {
    let usable = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };

    let total: f64 = weights.iter().copied().map(usable).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
    let r = unit * total;

    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (idx, w) in weights.iter().copied().map(usable).enumerate() {
        if w == 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(idx);
        if cumulative > r {
            return Some(idx);
        }
    }

    // Rounding can leave r at the final bound; the last live entry owns it.
    last_positive
}

/// Draws one entry from `(outcome, weight)` pairs.
pub fn draw_weighted<'a, T>(
    entries: &'a [(T, f64)],
    rng: &dyn RandomSource,
    pool_name: &str,
) -> Result<&'a T, Error> {
    let weights: Vec<f64> = entries.iter().map(|(_, w)| *w).collect();
    select_index(&weights, rng.next_uniform())
        .map(|idx| &entries[idx].0)
        .ok_or_else(|| Error::EmptyPool(pool_name.to_string()))
}

/// Catalog variant: `drop_chance` is an unnormalised weight over the case's
/// prize list.
pub fn draw_prize<'a>(case: &'a LootCase, rng: &dyn RandomSource) -> Result<&'a Prize, Error> {
    let weights: Vec<f64> = case.prizes.iter().map(|p| p.drop_chance).collect();
    select_index(&weights, rng.next_uniform())
        .map(|idx| &case.prizes[idx])
        .ok_or_else(|| Error::EmptyPool(case.id.clone()))
}
