//! Combatant model: identity, stat blocks and runtime vitals.

use std::fmt;

use crate::env::SpeciesTemplate;

use super::status::{StatusEffectKind, StatusEffects};

/// Opaque identifier for a battle participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which team a participant fights for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opposing(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Stat block read by the combat formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic_attack: u32,
    pub magic_defense: u32,
    pub speed: u32,
    pub accuracy: u32,
    /// Species-level capture ease on a 0-100 scale (higher is easier).
    pub capture_rate: u32,
    pub level: u32,
}

/// Mutable runtime state of a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub hp: u32,
    pub mp: u32,
    pub effects: StatusEffects,
}

impl Vitals {
    /// Full HP and MP, no effects.
    pub fn full(stats: &Stats) -> Self {
        Self {
            hp: stats.max_hp,
            mp: stats.max_mp,
            effects: StatusEffects::empty(),
        }
    }
}

/// Anything that can stand in a battle.
///
/// Implementors supply the stat block and vitals; every battle rule goes
/// through the provided methods so HP and MP stay within `[0, max]`.
pub trait Fighter: fmt::Debug {
    fn stats(&self) -> &Stats;
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;

    /// Display name used in logs.
    fn name(&self) -> &str {
        "combatant"
    }

    /// Species key used for AI policy lookup.
    fn species(&self) -> Option<&str> {
        None
    }

    fn is_alive(&self) -> bool {
        self.vitals().hp > 0
    }

    /// Remaining HP as a fraction of max HP, in `[0, 1]`.
    fn hp_fraction(&self) -> f64 {
        let max = self.stats().max_hp;
        if max == 0 {
            return 0.0;
        }
        (self.vitals().hp.min(max) as f64) / max as f64
    }

    /// Stats after status modifiers.
    fn effective_stats(&self) -> Stats {
        let mut stats = *self.stats();
        let effects = &self.vitals().effects;
        let offense = 100u32.saturating_sub(effects.magnitude_of(StatusEffectKind::Weakened));
        let defense = 100u32.saturating_add(effects.magnitude_of(StatusEffectKind::Shielded));

        stats.attack = scale(stats.attack, offense);
        stats.magic_attack = scale(stats.magic_attack, offense);
        stats.defense = scale(stats.defense, defense);
        stats.magic_defense = scale(stats.magic_defense, defense);
        stats
    }

    /// Removes up to `amount` HP. Returns the HP actually lost.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let vitals = self.vitals_mut();
        let lost = amount.min(vitals.hp);
        vitals.hp -= lost;
        if vitals.hp == 0 {
            vitals.effects.clear();
        }
        lost
    }

    /// Restores up to `amount` HP without exceeding max. Returns HP gained.
    ///
    /// Defeated combatants are never revived.
    fn heal(&mut self, amount: u32) -> u32 {
        let max = self.stats().max_hp;
        let vitals = self.vitals_mut();
        if vitals.hp == 0 {
            return 0;
        }
        let gained = amount.min(max.saturating_sub(vitals.hp));
        vitals.hp += gained;
        gained
    }

    /// Spends `cost` MP if available.
    fn spend_mp(&mut self, cost: u32) -> bool {
        let vitals = self.vitals_mut();
        if vitals.mp < cost {
            return false;
        }
        vitals.mp -= cost;
        true
    }

    /// Restores up to `amount` MP without exceeding max. Returns MP gained.
    fn restore_mp(&mut self, amount: u32) -> u32 {
        let max = self.stats().max_mp;
        let vitals = self.vitals_mut();
        let gained = amount.min(max.saturating_sub(vitals.mp));
        vitals.mp += gained;
        gained
    }
}

fn scale(value: u32, percent: u32) -> u32 {
    ((value as u64 * percent as u64) / 100).min(u32::MAX as u64) as u32
}

/// Standard combatant built from a species or class template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub species: Option<String>,
    pub stats: Stats,
    pub vitals: Vitals,
}

impl Combatant {
    /// Creates a combatant at full HP and MP.
    pub fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self {
            name: name.into(),
            species: None,
            vitals: Vitals::full(&stats),
            stats,
        }
    }

    /// Instantiates a template at `level` (minimum 1).
    pub fn from_template(template: &SpeciesTemplate, level: u32) -> Self {
        let stats = template.stats_at(level);
        Self {
            name: template.name.clone(),
            species: Some(template.id.clone()),
            vitals: Vitals::full(&stats),
            stats,
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Sets current HP, clamped to `[0, max_hp]`.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.vitals.hp = hp.min(self.stats.max_hp);
        self
    }

    /// Sets current MP, clamped to `[0, max_mp]`.
    pub fn with_mp(mut self, mp: u32) -> Self {
        self.vitals.mp = mp.min(self.stats.max_mp);
        self
    }
}

impl Fighter for Combatant {
    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }
}
