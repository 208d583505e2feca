//! Flee rolls.

use crate::rng::RngOracle;

/// Rolls once against `chance` percent. Non-finite chances never succeed.
pub fn roll_flee(chance: f64, rng: &mut (impl RngOracle + ?Sized)) -> bool {
    let chance = if chance.is_finite() { chance } else { 0.0 };
    rng.check(chance)
}
