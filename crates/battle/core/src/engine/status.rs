use crate::action::FailureReason;
use crate::state::{CombatantId, StatusEffect, StatusEffectKind};

use super::BattleSession;

/// What one status effect did to one combatant during an end-of-turn pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusTick {
    pub target: CombatantId,
    pub kind: StatusEffectKind,
    /// HP lost to poison or burn.
    pub damage: u32,
    /// HP recovered from regeneration.
    pub healed: u32,
    /// The effect ran out on this pass.
    pub expired: bool,
    /// The target dropped to 0 HP on this pass.
    pub defeated: bool,
}

/// Status effect table methods for BattleSession.
impl BattleSession {
    /// Applies `kind` for `duration` end-of-turn passes at its default magnitude.
    pub fn apply_status_effect(
        &mut self,
        target: CombatantId,
        kind: StatusEffectKind,
        duration: u32,
    ) -> Result<StatusEffect, FailureReason> {
        self.apply_status_effect_with_magnitude(target, kind, duration, kind.default_magnitude())
    }

    /// Applies an effect with an explicit magnitude.
    ///
    /// Re-applying a kind already on the target refreshes its duration and
    /// keeps the stronger magnitude. Returns the effect as it now stands.
    pub fn apply_status_effect_with_magnitude(
        &mut self,
        target: CombatantId,
        kind: StatusEffectKind,
        duration: u32,
        magnitude: u32,
    ) -> Result<StatusEffect, FailureReason> {
        if duration == 0 {
            return Err(FailureReason::InvalidDuration);
        }
        let participant = self
            .participant_mut(target)
            .ok_or(FailureReason::UnknownTarget)?;
        if !participant.is_alive() {
            return Err(FailureReason::TargetDefeated);
        }

        let applied = participant
            .fighter
            .vitals_mut()
            .effects
            .apply(StatusEffect::new(kind, duration).with_magnitude(magnitude));

        tracing::debug!(combatant = %target, %kind, duration, magnitude = applied.magnitude, "status applied");
        Ok(applied)
    }

    /// Runs one decay step for every living participant.
    ///
    /// Each effect fires once, then loses one turn and is dropped at zero.
    /// A combatant defeated mid-pass loses its remaining effects at once.
    /// If the current actor falls, the turn passes to the next living
    /// participant. Does nothing once the battle is over.
    pub fn process_end_of_turn(&mut self) -> Vec<StatusTick> {
        if !self.turn.active {
            return Vec::new();
        }
        let mut ticks = Vec::new();

        for participant in self.participants.iter_mut() {
            if !participant.is_alive() {
                continue;
            }
            let fighter = participant.fighter.as_mut();
            let max_hp = fighter.stats().max_hp;
            let active: Vec<StatusEffect> = fighter.vitals().effects.iter().copied().collect();

            let mut fired = Vec::with_capacity(active.len());
            for effect in active {
                if !fighter.is_alive() {
                    break;
                }
                let (damage, healed) = match effect.kind {
                    StatusEffectKind::Poison => (fighter.take_damage(percent_of(max_hp, effect.magnitude)), 0),
                    StatusEffectKind::Burn => (fighter.take_damage(effect.magnitude.max(1)), 0),
                    StatusEffectKind::Regeneration => (0, fighter.heal(percent_of(max_hp, effect.magnitude))),
                    StatusEffectKind::Shielded | StatusEffectKind::Weakened => (0, 0),
                };
                fired.push(StatusTick {
                    target: participant.id,
                    kind: effect.kind,
                    damage,
                    healed,
                    expired: false,
                    defeated: false,
                });
            }

            let defeated = !fighter.is_alive();
            let expired = if defeated {
                fighter.vitals_mut().effects.clear();
                Vec::new()
            } else {
                fighter.vitals_mut().effects.decay()
            };

            for mut tick in fired {
                tick.expired = defeated || expired.contains(&tick.kind);
                ticks.push(tick);
            }
            if defeated {
                if let Some(last) = ticks.last_mut() {
                    last.defeated = true;
                }
            }
        }

        for tick in &ticks {
            tracing::debug!(
                combatant = %tick.target,
                kind = %tick.kind,
                damage = tick.damage,
                healed = tick.healed,
                expired = tick.expired,
                "status tick"
            );
        }

        if self.check_outcome().is_none() {
            self.skip_defeated_actor();
        }
        ticks
    }
}

/// `percent`% of `max`, at least 1 and at most `u32::MAX`.
fn percent_of(max: u32, percent: u32) -> u32 {
    ((max as u64 * percent as u64) / 100).clamp(1, u32::MAX as u64) as u32
}
