use crate::state::StatusEffectKind;

/// Battle configuration constants and tunable parameters.
///
/// Every numeric knob the combat formulas read lives here so that content
/// files can rebalance a game without touching the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub damage: DamageParams,
    pub capture: CaptureParams,
    pub flee: FleeParams,
    /// End the battle automatically once one side has no living participants.
    pub auto_resolve: bool,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per effect kind; re-application refreshes in place.
    pub const MAX_STATUS_EFFECTS: usize = <StatusEffectKind as strum::EnumCount>::COUNT;

    pub fn new() -> Self {
        Self {
            damage: DamageParams::default(),
            capture: CaptureParams::default(),
            flee: FleeParams::default(),
            auto_resolve: true,
        }
    }

    /// Disables automatic victory/defeat detection; callers end battles themselves.
    pub fn manual_resolution(mut self) -> Self {
        self.auto_resolve = false;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for [`crate::combat::compute_damage`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageParams {
    /// Lower bound of the variance band.
    pub variance_min: f64,
    /// Upper bound of the variance band (exclusive for rolls in `[0, 1)`).
    pub variance_max: f64,
    /// Probability in `[0, 1]` that a hit is critical.
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub minimum: u32,
}

impl DamageParams {
    pub const DEFAULT_VARIANCE_MIN: f64 = 0.85;
    pub const DEFAULT_VARIANCE_MAX: f64 = 1.0;
    pub const DEFAULT_CRIT_CHANCE: f64 = 0.10;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            variance_min: Self::DEFAULT_VARIANCE_MIN,
            variance_max: Self::DEFAULT_VARIANCE_MAX,
            crit_chance: Self::DEFAULT_CRIT_CHANCE,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            minimum: 1,
        }
    }
}

/// Parameters for capture attempts. Chances are percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaptureParams {
    pub min_chance: f64,
    pub max_chance: f64,
    /// Flat bonus granted by a capture item whose definition carries none.
    pub item_bonus: f64,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            min_chance: 5.0,
            max_chance: 95.0,
            item_bonus: 15.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleeParams {
    /// Percentage used when a flee request does not carry its own chance.
    pub default_chance: f64,
}

impl Default for FleeParams {
    fn default() -> Self {
        Self {
            default_chance: 50.0,
        }
    }
}
