//! Battle actions and their results.
//!
//! [`BattleAction`] is the single entry point for everything a participant
//! can do on its turn; the session resolves it with one exhaustive match and
//! answers with an [`ActionResult`] whatever the outcome.

mod error;
mod result;

pub use error::FailureReason;
pub use result::{ActionDetail, ActionResult, ItemApplied};

use crate::state::CombatantId;

/// Everything a participant can do on its turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BattleAction {
    /// Physical strike on one target.
    Attack {
        actor: CombatantId,
        target: CombatantId,
    },

    /// Spell cast. `cost` overrides the spell's own MP cost when set.
    Magic {
        actor: CombatantId,
        target: CombatantId,
        spell: String,
        cost: Option<u32>,
    },

    /// Consume an item from the actor side's inventory on the actor.
    UseItem { actor: CombatantId, item: String },

    /// Try to capture an opposing combatant, optionally with a capture item.
    Capture {
        actor: CombatantId,
        target: CombatantId,
        item: Option<String>,
    },

    /// Try to escape. `chance` is a percentage; `None` uses the configured default.
    Flee {
        actor: CombatantId,
        chance: Option<f64>,
    },

    /// Pass the turn.
    Wait { actor: CombatantId },
}

impl BattleAction {
    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::Attack { actor, target }
    }

    pub fn magic(actor: CombatantId, target: CombatantId, spell: impl Into<String>) -> Self {
        Self::Magic {
            actor,
            target,
            spell: spell.into(),
            cost: None,
        }
    }

    pub fn wait(actor: CombatantId) -> Self {
        Self::Wait { actor }
    }

    pub fn actor(&self) -> CombatantId {
        match self {
            Self::Attack { actor, .. }
            | Self::Magic { actor, .. }
            | Self::UseItem { actor, .. }
            | Self::Capture { actor, .. }
            | Self::Flee { actor, .. }
            | Self::Wait { actor } => *actor,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Attack { .. } => ActionKind::Attack,
            Self::Magic { .. } => ActionKind::Magic,
            Self::UseItem { .. } => ActionKind::UseItem,
            Self::Capture { .. } => ActionKind::Capture,
            Self::Flee { .. } => ActionKind::Flee,
            Self::Wait { .. } => ActionKind::Wait,
        }
    }
}

/// Discriminant of [`BattleAction`], carried by results and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    Attack,
    Magic,
    UseItem,
    Capture,
    Flee,
    Wait,
}
