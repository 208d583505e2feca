use super::{CombatantId, Side};

/// Turn bookkeeping for one battle session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// True exactly between `start_battle` and `end_battle`.
    pub active: bool,

    /// One full pass over the turn order. Starts at 1.
    pub round: u32,

    /// Index into the speed-sorted participant list of whoever acts next.
    pub current_index: usize,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            active: false,
            round: 1,
            current_index: 0,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleResult {
    /// No living enemy remains.
    Victory,
    /// No living player-side participant remains.
    Defeat,
    /// A participant escaped.
    Fled { actor: CombatantId, side: Side },
}

impl BattleResult {
    /// The side that came out on top, if any.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Self::Victory => Some(Side::Player),
            Self::Defeat => Some(Side::Enemy),
            Self::Fled { .. } => None,
        }
    }
}
