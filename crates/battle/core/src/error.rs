//! Common error infrastructure for battle-core.
//!
//! Two families of failure exist in a battle:
//!
//! - **Rule violations** (not your turn, insufficient MP, defeated target) are
//!   ordinary game outcomes. They are reported inside
//!   [`ActionResult`](crate::action::ActionResult) as a
//!   [`FailureReason`](crate::action::FailureReason), never as `Err`.
//! - **Integration errors** (empty roster, duplicate ids, querying an inactive
//!   battle) indicate a caller bug and surface as [`BattleError`].
//!
//! Both implement [`GameError`] so callers can classify them uniformly.

use crate::state::CombatantId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller may retry with another action.
    ///
    /// Examples: insufficient MP, target already defeated
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown target id, item not in the catalog
    Validation,

    /// Internal error - the engine was driven incorrectly.
    ///
    /// Examples: empty participant list, duplicate participant ids
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a caller bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised when the engine is driven outside its contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("a battle needs at least one participant")]
    EmptyRoster,

    #[error("participant {0} appears more than once")]
    DuplicateParticipant(CombatantId),

    #[error("no battle is currently active")]
    Inactive,
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyRoster | Self::DuplicateParticipant(_) => ErrorSeverity::Internal,
            Self::Inactive => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "BATTLE_EMPTY_ROSTER",
            Self::DuplicateParticipant(_) => "BATTLE_DUPLICATE_PARTICIPANT",
            Self::Inactive => "BATTLE_INACTIVE",
        }
    }
}
