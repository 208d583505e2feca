//! Damage calculation.

use crate::config::DamageParams;
use crate::rng::RngOracle;
use crate::state::Stats;

/// Which stat pair a hit reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageKind {
    /// `attack` vs `defense`.
    Physical,
    /// `magic_attack` vs `magic_defense`.
    Magical,
}

/// Outcome of one damage roll.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    /// Final damage, always at least `DamageParams::minimum`.
    pub amount: u32,
    /// Offense minus defense before variance, at least 1.
    pub base: u32,
    /// Variance factor that was applied.
    pub variance: f64,
    pub critical: bool,
}

/// Calculate damage from one hit.
///
/// # Formula
///
/// ```text
/// base     = max(offense - defense, 1)
/// variance = variance_min + roll_1 * (variance_max - variance_min)
/// critical = roll_2 < crit_chance
/// damage   = floor(base * variance * (critical ? crit_multiplier : 1))
/// damage   = max(damage, minimum, 1)
/// ```
///
/// Exactly two rolls are consumed, variance first, then critical.
pub fn compute_damage(
    attacker: &Stats,
    defender: &Stats,
    kind: DamageKind,
    rng: &mut (impl RngOracle + ?Sized),
    params: &DamageParams,
) -> DamageRoll {
    let (offense, defense) = match kind {
        DamageKind::Physical => (attacker.attack, defender.defense),
        DamageKind::Magical => (attacker.magic_attack, defender.magic_defense),
    };
    let base = offense.saturating_sub(defense).max(1);

    let variance_roll = rng.next_f64();
    let crit_roll = rng.next_f64();

    let spread = (params.variance_max - params.variance_min).max(0.0);
    let variance = params.variance_min + variance_roll * spread;
    let critical = crit_roll < params.crit_chance;

    let mut damage = base as f64 * variance;
    if critical {
        damage *= params.crit_multiplier;
    }

    DamageRoll {
        amount: to_damage(damage, params.minimum),
        base,
        variance,
        critical,
    }
}

/// Scales a roll by a power percentage, keeping the damage floor.
pub fn apply_power(roll: DamageRoll, power: u32, params: &DamageParams) -> DamageRoll {
    if power == 100 {
        return roll;
    }
    DamageRoll {
        amount: to_damage(roll.amount as f64 * power as f64 / 100.0, params.minimum),
        ..roll
    }
}

fn to_damage(value: f64, minimum: u32) -> u32 {
    let floor = minimum.max(1);
    if !value.is_finite() || value < floor as f64 {
        return floor;
    }
    if value >= u32::MAX as f64 {
        return u32::MAX;
    }
    (value.floor() as u32).max(floor)
}
