//! Status effects carried by combatants.
//!
//! Effects count down in end-of-turn passes rather than ticks: an effect
//! applied with a duration of N fires on N passes of
//! [`BattleSession::process_end_of_turn`](crate::engine::BattleSession::process_end_of_turn)
//! and is removed by the last one.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

/// A single timed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// End-of-turn passes left before the effect expires.
    pub remaining_turns: u32,
    /// Kind-specific strength; see [`StatusEffectKind`].
    pub magnitude: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, remaining_turns: u32) -> Self {
        Self {
            kind,
            remaining_turns,
            magnitude: kind.default_magnitude(),
        }
    }

    pub fn with_magnitude(mut self, magnitude: u32) -> Self {
        self.magnitude = magnitude;
        self
    }
}

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusEffectKind {
    /// Loses `magnitude` percent of max HP per pass (at least 1).
    Poison,

    /// Loses `magnitude` HP per pass (at least 1).
    Burn,

    /// Recovers `magnitude` percent of max HP per pass (at least 1).
    Regeneration,

    /// Defense and magic defense raised by `magnitude` percent.
    Shielded,

    /// Attack and magic attack lowered by `magnitude` percent.
    Weakened,
}

impl StatusEffectKind {
    pub const fn default_magnitude(self) -> u32 {
        match self {
            Self::Poison => 10,
            Self::Burn => 5,
            Self::Regeneration => 10,
            Self::Shielded => 50,
            Self::Weakened => 25,
        }
    }

    /// True for effects that only change stats and have no per-pass impact.
    pub const fn is_modifier(self) -> bool {
        matches!(self, Self::Shielded | Self::Weakened)
    }
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Adds an effect, or refreshes an existing one of the same kind.
    ///
    /// Refreshing replaces the remaining duration and keeps the stronger
    /// magnitude. Returns the effect as it now stands.
    pub fn apply(&mut self, effect: StatusEffect) -> StatusEffect {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.remaining_turns = effect.remaining_turns;
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            return *existing;
        }

        // at most one entry per kind, so the table never overflows
        self.effects.push(effect);
        effect
    }

    /// Removes an effect immediately. Returns true if it was present.
    pub fn remove(&mut self, kind: StatusEffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        before != self.effects.len()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Decrements every effect by one pass and drops the expired ones.
    ///
    /// Returns the kinds that expired.
    pub fn decay(&mut self) -> Vec<StatusEffectKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            if effect.remaining_turns == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining_turns > 0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Magnitude of the active effect of `kind`, or 0 when absent.
    pub fn magnitude_of(&self, kind: StatusEffectKind) -> u32 {
        self.get(kind).map_or(0, |e| e.magnitude)
    }
}
