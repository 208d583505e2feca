use std::collections::HashSet;

use crate::error::BattleError;
use crate::state::{BattleResult, CombatantId, Participant, ParticipantSpec, Side, TurnState};

use super::BattleSession;

/// Turn scheduling methods for BattleSession.
impl BattleSession {
    /// Starts a battle, ordering participants by speed (descending, stable on ties).
    ///
    /// Any previous battle state is discarded. Inventories and storage persist.
    pub fn start_battle(
        &mut self,
        participants: Vec<ParticipantSpec>,
    ) -> Result<&[Participant], BattleError> {
        if participants.is_empty() {
            return Err(BattleError::EmptyRoster);
        }

        let mut seen = HashSet::with_capacity(participants.len());
        for spec in &participants {
            if !seen.insert(spec.id) {
                return Err(BattleError::DuplicateParticipant(spec.id));
            }
        }

        let mut ordered: Vec<Participant> = participants.into_iter().map(Participant::from).collect();
        // Vec::sort_by is stable: equal speeds keep insertion order.
        ordered.sort_by(|a, b| b.speed.cmp(&a.speed));

        self.contested = ordered.iter().any(|p| p.side == Side::Player)
            && ordered.iter().any(|p| p.side == Side::Enemy);
        self.participants = ordered;
        self.result = None;
        self.turn = TurnState {
            active: true,
            round: 1,
            current_index: self
                .participants
                .iter()
                .position(Participant::is_alive)
                .unwrap_or(0),
        };

        tracing::info!(
            participants = self.participants.len(),
            order = ?self.participants.iter().map(|p| p.id).collect::<Vec<_>>(),
            "battle started"
        );

        Ok(&self.participants)
    }

    /// Returns the participant whose turn it is.
    pub fn current_actor(&self) -> Result<&Participant, BattleError> {
        if !self.turn.active {
            return Err(BattleError::Inactive);
        }
        self.participants
            .get(self.turn.current_index)
            .ok_or(BattleError::Inactive)
    }

    /// Ends the battle and records its result. Calling again overwrites the result.
    pub fn end_battle(&mut self, result: BattleResult) {
        self.turn.active = false;
        self.result = Some(result);
        tracing::info!(%result, round = self.turn.round, "battle ended");
    }

    /// Discards participants, counters and result. Inventories and storage persist.
    pub fn reset(&mut self) {
        self.participants.clear();
        self.turn = TurnState::new();
        self.result = None;
        self.contested = false;
    }

    /// Moves to the next living participant, incrementing the round on wrap.
    pub(crate) fn advance_turn(&mut self) {
        if !self.turn.active || self.participants.is_empty() {
            return;
        }

        let count = self.participants.len();
        for _ in 0..count {
            self.turn.current_index += 1;
            if self.turn.current_index >= count {
                self.turn.current_index = 0;
                self.turn.round += 1;
            }
            if self.participants[self.turn.current_index].is_alive() {
                return;
            }
        }
    }

    /// Moves off the current participant if it has been defeated.
    pub(crate) fn skip_defeated_actor(&mut self) {
        let defeated = self
            .participants
            .get(self.turn.current_index)
            .is_some_and(|p| !p.is_alive());
        if defeated {
            self.advance_turn();
        }
    }

    /// Takes a participant out of the turn order, keeping the current actor in place.
    pub(crate) fn remove_participant(&mut self, id: CombatantId) -> Option<Participant> {
        let index = self.index_of(id)?;
        let removed = self.participants.remove(index);

        if index < self.turn.current_index {
            self.turn.current_index -= 1;
        }
        if self.turn.current_index >= self.participants.len() {
            self.turn.current_index = 0;
        }

        Some(removed)
    }

    /// Ends the battle when one side has no living participants.
    ///
    /// Only runs with `auto_resolve` enabled, while active, and when both sides
    /// were present at start.
    pub(crate) fn check_outcome(&mut self) -> Option<BattleResult> {
        if !self.config.auto_resolve || !self.turn.active || !self.contested {
            return None;
        }

        let alive = |side: Side| {
            self.participants
                .iter()
                .any(|p| p.side == side && p.is_alive())
        };

        let result = if !alive(Side::Enemy) {
            BattleResult::Victory
        } else if !alive(Side::Player) {
            BattleResult::Defeat
        } else {
            return None;
        };

        self.end_battle(result);
        Some(result)
    }
}
