//! Rule-violation reasons reported by failed actions.

use crate::error::{ErrorSeverity, GameError};

/// Why an action did not succeed.
///
/// These are ordinary game outcomes. They travel inside
/// [`ActionResult`](super::ActionResult) and render as kebab-case codes
/// (`"not-your-turn"`, `"insufficient-mp"`, ...).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FailureReason {
    /// No battle is running.
    BattleInactive,

    /// The actor is not the current participant.
    NotYourTurn,

    /// The actor id is not in the battle.
    UnknownActor,

    /// The actor has been defeated.
    ActorDefeated,

    /// The target id is not in the battle.
    UnknownTarget,

    /// The target has been defeated.
    TargetDefeated,

    /// The target is not a legal choice for this action.
    InvalidTarget,

    /// Not enough MP for the spell.
    InsufficientMp,

    /// The item is not in the actor side's inventory.
    ItemUnavailable,

    /// The item is not in the catalog.
    UnknownItem,

    /// The item cannot be used this way.
    ItemNotUsable,

    /// The capture roll failed.
    CaptureFailed,

    /// The flee roll failed.
    FleeFailed,

    /// Status durations must be at least one pass.
    InvalidDuration,
}

impl FailureReason {
    /// Reasons rejected before resolution. These do not consume the turn.
    pub const fn is_rejection(self) -> bool {
        matches!(
            self,
            Self::BattleInactive | Self::NotYourTurn | Self::UnknownActor
        )
    }

    pub fn code(self) -> &'static str {
        self.into()
    }
}

impl GameError for FailureReason {
    fn severity(&self) -> ErrorSeverity {
        use FailureReason::*;
        match self {
            BattleInactive | NotYourTurn | ActorDefeated => ErrorSeverity::Recoverable,
            TargetDefeated | InsufficientMp | ItemUnavailable => ErrorSeverity::Recoverable,
            CaptureFailed | FleeFailed => ErrorSeverity::Recoverable,
            UnknownActor | UnknownTarget | InvalidTarget => ErrorSeverity::Validation,
            UnknownItem | ItemNotUsable | InvalidDuration => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        self.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_render_as_kebab_case() {
        assert_eq!(FailureReason::NotYourTurn.to_string(), "not-your-turn");
        assert_eq!(FailureReason::InsufficientMp.code(), "insufficient-mp");
        assert_eq!(FailureReason::BattleInactive.as_ref(), "battle-inactive");
    }

    #[test]
    fn only_turn_gating_reasons_are_rejections() {
        assert!(FailureReason::NotYourTurn.is_rejection());
        assert!(FailureReason::BattleInactive.is_rejection());
        assert!(FailureReason::UnknownActor.is_rejection());
        assert!(!FailureReason::InsufficientMp.is_rejection());
        assert!(!FailureReason::CaptureFailed.is_rejection());
    }

    #[test]
    fn severity_separates_bad_input_from_game_outcomes() {
        assert!(FailureReason::FleeFailed.severity().is_recoverable());
        assert_eq!(FailureReason::UnknownTarget.severity(), ErrorSeverity::Validation);
    }
}
