//! Capture chance and capture rolls.

use crate::config::CaptureParams;
use crate::rng::RngOracle;
use crate::state::Fighter;

/// Adjustments applied after the base capture chance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaptureModifiers {
    /// Added after the multiplier, in percentage points.
    pub flat_bonus: f64,
    pub multiplier: f64,
}

impl CaptureModifiers {
    pub const NONE: Self = Self {
        flat_bonus: 0.0,
        multiplier: 1.0,
    };

    pub fn flat(flat_bonus: f64) -> Self {
        Self {
            flat_bonus,
            ..Self::NONE
        }
    }
}

impl Default for CaptureModifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Percentage chance to capture `target`.
///
/// # Formula
///
/// ```text
/// base   = capture_rate * (3 * max_hp - 2 * hp) / (3 * max_hp)
/// chance = clamp(base * multiplier + flat_bonus, min_chance, max_chance)
/// ```
///
/// At full HP the base is a third of the species rate and approaches the full
/// rate as HP drops. The clamp guarantees no attempt is ever certain or
/// hopeless.
pub fn compute_capture_chance(
    target: &(impl Fighter + ?Sized),
    modifiers: Option<CaptureModifiers>,
    params: &CaptureParams,
) -> f64 {
    let modifiers = modifiers.unwrap_or_default();
    let rate = target.stats().capture_rate.min(100) as f64;
    let hp_fraction = target.hp_fraction();

    let base = rate * (3.0 - 2.0 * hp_fraction) / 3.0;
    let chance = base * modifiers.multiplier + modifiers.flat_bonus;

    clamp_chance(chance, params)
}

fn clamp_chance(chance: f64, params: &CaptureParams) -> f64 {
    let (min, max) = (params.min_chance, params.max_chance.max(params.min_chance));
    if chance.is_nan() {
        return min;
    }
    chance.clamp(min, max)
}

/// Rolls once against `chance` percent.
pub fn roll_capture(chance: f64, rng: &mut (impl RngOracle + ?Sized)) -> bool {
    rng.check(chance)
}
