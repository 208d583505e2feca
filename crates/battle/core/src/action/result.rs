//! Structured action results.

use crate::combat::DamageRoll;
use crate::state::{BattleResult, CombatantId, StatusEffectKind};

use super::{ActionKind, FailureReason};

/// Outcome of one action, identical in shape for player and AI turns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub actor: CombatantId,
    pub kind: ActionKind,
    pub success: bool,
    /// Set exactly when `success` is false.
    pub reason: Option<FailureReason>,
    pub detail: ActionDetail,
    /// Set when this action ended the battle.
    pub battle_ended: Option<BattleResult>,
}

impl ActionResult {
    pub(crate) fn succeeded(actor: CombatantId, kind: ActionKind, detail: ActionDetail) -> Self {
        Self {
            actor,
            kind,
            success: true,
            reason: None,
            detail,
            battle_ended: None,
        }
    }

    pub(crate) fn failed(actor: CombatantId, kind: ActionKind, reason: FailureReason) -> Self {
        Self {
            actor,
            kind,
            success: false,
            reason: Some(reason),
            detail: ActionDetail::None,
            battle_ended: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: ActionDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Damage dealt, for attacks and spells.
    pub fn damage(&self) -> Option<u32> {
        match &self.detail {
            ActionDetail::Damage { roll, .. } => Some(roll.amount),
            _ => None,
        }
    }

    /// Success chance that was rolled against, for captures and flee attempts.
    pub fn chance(&self) -> Option<f64> {
        match &self.detail {
            ActionDetail::Capture { chance, .. } | ActionDetail::Flee { chance } => Some(*chance),
            _ => None,
        }
    }

    /// True when a rule check refused the action before it resolved.
    ///
    /// Rejected actions do not consume the actor's turn.
    pub fn was_rejected(&self) -> bool {
        self.reason.is_some_and(FailureReason::is_rejection)
    }
}

/// Kind-specific payload of an [`ActionResult`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "detail", rename_all = "snake_case"))]
pub enum ActionDetail {
    None,

    Damage {
        target: CombatantId,
        roll: DamageRoll,
        /// Target HP after the hit.
        target_hp: u32,
        defeated: bool,
        /// MP spent by a spell, 0 for attacks.
        mp_spent: u32,
        status_applied: Option<StatusEffectKind>,
    },

    Item {
        item: String,
        applied: ItemApplied,
    },

    Capture {
        target: CombatantId,
        chance: f64,
        item_consumed: Option<String>,
    },

    Flee {
        chance: f64,
    },
}

/// What a used item did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemApplied {
    Healed(u32),
    RestoredMp(u32),
    Cured(StatusEffectKind),
}
