use crate::combat::DamageKind;
use crate::state::StatusEffectKind;

/// Spell definition consumed by the `magic` action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: String,
    pub name: String,
    pub mp_cost: u32,
    /// Damage scale in percent of the rolled magical damage.
    #[cfg_attr(feature = "serde", serde(default = "default_power"))]
    pub power: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_kind"))]
    pub kind: DamageKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inflicts: Option<StatusInfliction>,
}

#[cfg(feature = "serde")]
fn default_power() -> u32 {
    100
}

#[cfg(feature = "serde")]
fn default_kind() -> DamageKind {
    DamageKind::Magical
}

impl SpellDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, mp_cost: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mp_cost,
            power: 100,
            kind: DamageKind::Magical,
            inflicts: None,
        }
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn with_infliction(mut self, inflicts: StatusInfliction) -> Self {
        self.inflicts = Some(inflicts);
        self
    }
}

/// Status effect a spell may leave on its target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInfliction {
    pub kind: StatusEffectKind,
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: Option<u32>,
    /// Percentage chance to apply. 100 skips the roll entirely.
    #[cfg_attr(feature = "serde", serde(default = "always"))]
    pub chance: f64,
}

#[cfg(feature = "serde")]
fn always() -> f64 {
    100.0
}

impl StatusInfliction {
    pub fn new(kind: StatusEffectKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            magnitude: None,
            chance: 100.0,
        }
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }
}
