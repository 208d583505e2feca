//! Action resolution.
//!
//! Every action flows through [`BattleSession::perform_action`]:
//! turn check → resolve → outcome check → turn advance.
//!
//! Rejections (inactive battle, wrong actor) return before resolution and
//! leave the turn where it is. Every resolved action, successful or not,
//! consumes the actor's turn.

use crate::action::{ActionDetail, ActionKind, ActionResult, BattleAction, FailureReason, ItemApplied};
use crate::combat::{
    CaptureModifiers, DamageKind, DamageRoll, apply_power, compute_capture_chance, compute_damage,
    roll_capture, roll_flee,
};
use crate::env::ItemEffect;
use crate::state::{BattleResult, Captured, CombatantId, Side};

use super::BattleSession;

impl BattleSession {
    /// Resolves one action for the current actor.
    pub fn perform_action(&mut self, action: BattleAction) -> ActionResult {
        let actor = action.actor();
        let kind = action.kind();

        if let Err(reason) = self.check_turn(actor) {
            tracing::debug!(%actor, %kind, %reason, "action rejected");
            return ActionResult::failed(actor, kind, reason);
        }

        let mut result = match action {
            BattleAction::Attack { actor, target } => self.resolve_attack(actor, target),
            BattleAction::Magic {
                actor,
                target,
                spell,
                cost,
            } => self.resolve_magic(actor, target, &spell, cost),
            BattleAction::UseItem { actor, item } => self.resolve_item(actor, &item),
            BattleAction::Capture {
                actor,
                target,
                item,
            } => self.resolve_capture(actor, target, item.as_deref()),
            BattleAction::Flee { actor, chance } => self.resolve_flee(actor, chance),
            BattleAction::Wait { actor } => self.resolve_wait(actor),
        };

        tracing::debug!(
            %actor,
            %kind,
            success = result.success,
            reason = result.reason.map(FailureReason::code),
            round = self.turn.round,
            "action resolved"
        );

        self.check_outcome();
        if !self.turn.active {
            result.battle_ended = self.result;
        }
        self.advance_turn();

        result
    }

    pub fn attack(&mut self, actor: CombatantId, target: CombatantId) -> ActionResult {
        self.perform_action(BattleAction::Attack { actor, target })
    }

    /// Casts `spell`. A `cost` of `None` uses the spell's own MP cost.
    pub fn magic(
        &mut self,
        actor: CombatantId,
        target: CombatantId,
        spell: &str,
        cost: Option<u32>,
    ) -> ActionResult {
        self.perform_action(BattleAction::Magic {
            actor,
            target,
            spell: spell.to_owned(),
            cost,
        })
    }

    pub fn use_item(&mut self, actor: CombatantId, item: &str) -> ActionResult {
        self.perform_action(BattleAction::UseItem {
            actor,
            item: item.to_owned(),
        })
    }

    pub fn attempt_capture(
        &mut self,
        actor: CombatantId,
        target: CombatantId,
        item: Option<&str>,
    ) -> ActionResult {
        self.perform_action(BattleAction::Capture {
            actor,
            target,
            item: item.map(str::to_owned),
        })
    }

    /// Tries to escape. `chance` is a percentage; `None` uses the configured default.
    pub fn attempt_flee(&mut self, actor: CombatantId, chance: Option<f64>) -> ActionResult {
        self.perform_action(BattleAction::Flee { actor, chance })
    }

    pub fn wait(&mut self, actor: CombatantId) -> ActionResult {
        self.perform_action(BattleAction::Wait { actor })
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_turn(&self, actor: CombatantId) -> Result<(), FailureReason> {
        if !self.turn.active {
            return Err(FailureReason::BattleInactive);
        }
        let current = self.participants.get(self.turn.current_index).map(|p| p.id);
        if current == Some(actor) {
            return Ok(());
        }
        if self.index_of(actor).is_none() {
            return Err(FailureReason::UnknownActor);
        }
        Err(FailureReason::NotYourTurn)
    }

    /// Index and side of a living actor.
    fn living_actor(&self, actor: CombatantId) -> Result<(usize, Side), FailureReason> {
        let index = self.index_of(actor).ok_or(FailureReason::UnknownActor)?;
        let participant = &self.participants[index];
        if !participant.is_alive() {
            return Err(FailureReason::ActorDefeated);
        }
        Ok((index, participant.side))
    }

    /// Index of a living target on the side opposing `actor_side`.
    fn opposing_target(&self, actor_side: Side, target: CombatantId) -> Result<usize, FailureReason> {
        let index = self.index_of(target).ok_or(FailureReason::UnknownTarget)?;
        let participant = &self.participants[index];
        if !participant.is_alive() {
            return Err(FailureReason::TargetDefeated);
        }
        if participant.side == actor_side {
            return Err(FailureReason::InvalidTarget);
        }
        Ok(index)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    fn resolve_attack(&mut self, actor: CombatantId, target: CombatantId) -> ActionResult {
        let kind = ActionKind::Attack;
        let (actor_index, target_index) = match self
            .living_actor(actor)
            .and_then(|(index, side)| self.opposing_target(side, target).map(|t| (index, t)))
        {
            Ok(indices) => indices,
            Err(reason) => return ActionResult::failed(actor, kind, reason),
        };

        let roll = self.roll_damage(actor_index, target_index, DamageKind::Physical);
        let detail = self.land_hit(target_index, roll, 0);
        ActionResult::succeeded(actor, kind, detail)
    }

    fn resolve_magic(
        &mut self,
        actor: CombatantId,
        target: CombatantId,
        spell_id: &str,
        cost: Option<u32>,
    ) -> ActionResult {
        let kind = ActionKind::Magic;
        let (actor_index, target_index) = match self
            .living_actor(actor)
            .and_then(|(index, side)| self.opposing_target(side, target).map(|t| (index, t)))
        {
            Ok(indices) => indices,
            Err(reason) => return ActionResult::failed(actor, kind, reason),
        };

        let spell = self.catalog.spell(spell_id).cloned();
        if spell.is_none() {
            tracing::debug!(spell = spell_id, "unknown spell; casting as plain magical damage");
        }
        let cost = cost.or(spell.as_ref().map(|s| s.mp_cost)).unwrap_or(0);

        if !self.participants[actor_index].fighter.spend_mp(cost) {
            return ActionResult::failed(actor, kind, FailureReason::InsufficientMp);
        }

        let (damage_kind, power) = spell
            .as_ref()
            .map_or((DamageKind::Magical, 100), |s| (s.kind, s.power));
        let roll = self.roll_damage(actor_index, target_index, damage_kind);
        let roll = apply_power(roll, power, &self.config.damage);

        // The status roll is skipped for guaranteed inflictions and fallen targets.
        let mut status_applied = None;
        let mut detail = self.land_hit(target_index, roll, cost);
        if let Some(infliction) = spell.as_ref().and_then(|s| s.inflicts) {
            let target_alive = self.participants[target_index].is_alive();
            let lands = target_alive
                && (infliction.chance >= 100.0 || self.rng.check(infliction.chance));
            if lands {
                let magnitude = infliction
                    .magnitude
                    .unwrap_or_else(|| infliction.kind.default_magnitude());
                status_applied = self
                    .apply_status_effect_with_magnitude(
                        target,
                        infliction.kind,
                        infliction.duration,
                        magnitude,
                    )
                    .ok()
                    .map(|effect| effect.kind);
            }
        }
        if let ActionDetail::Damage {
            status_applied: slot,
            ..
        } = &mut detail
        {
            *slot = status_applied;
        }

        ActionResult::succeeded(actor, kind, detail)
    }

    fn resolve_item(&mut self, actor: CombatantId, item_id: &str) -> ActionResult {
        let kind = ActionKind::UseItem;
        let (actor_index, side) = match self.living_actor(actor) {
            Ok(found) => found,
            Err(reason) => return ActionResult::failed(actor, kind, reason),
        };

        if !self.side(side).inventory.contains(item_id) {
            return ActionResult::failed(actor, kind, FailureReason::ItemUnavailable);
        }
        let Some(effect) = self.catalog.item(item_id).map(|def| def.effect) else {
            return ActionResult::failed(actor, kind, FailureReason::UnknownItem);
        };

        let fighter = self.participants[actor_index].fighter.as_mut();
        let applied = match effect {
            ItemEffect::Heal { amount } => ItemApplied::Healed(fighter.heal(amount)),
            ItemEffect::RestoreMp { amount } => ItemApplied::RestoredMp(fighter.restore_mp(amount)),
            ItemEffect::Cure { status } => {
                fighter.vitals_mut().effects.remove(status);
                ItemApplied::Cured(status)
            }
            ItemEffect::Capture { .. } => {
                return ActionResult::failed(actor, kind, FailureReason::ItemNotUsable);
            }
        };

        self.side_mut(side).inventory.consume(item_id);
        ActionResult::succeeded(
            actor,
            kind,
            ActionDetail::Item {
                item: item_id.to_owned(),
                applied,
            },
        )
    }

    fn resolve_capture(
        &mut self,
        actor: CombatantId,
        target: CombatantId,
        item: Option<&str>,
    ) -> ActionResult {
        let kind = ActionKind::Capture;
        let (side, target_index) = match self
            .living_actor(actor)
            .and_then(|(_, side)| self.opposing_target(side, target).map(|t| (side, t)))
        {
            Ok(found) => found,
            Err(reason) => return ActionResult::failed(actor, kind, reason),
        };

        let modifiers = match item {
            Some(item_id) => {
                if !self.side(side).inventory.contains(item_id) {
                    return ActionResult::failed(actor, kind, FailureReason::ItemUnavailable);
                }
                let bonus = match self.catalog.item(item_id).map(|def| def.effect) {
                    Some(ItemEffect::Capture { bonus }) => bonus,
                    Some(_) => {
                        return ActionResult::failed(actor, kind, FailureReason::ItemNotUsable);
                    }
                    None => self.config.capture.item_bonus,
                };
                self.side_mut(side).inventory.consume(item_id);
                Some(CaptureModifiers::flat(bonus))
            }
            None => None,
        };

        let chance = compute_capture_chance(
            &*self.participants[target_index].fighter,
            modifiers,
            &self.config.capture,
        );
        let detail = ActionDetail::Capture {
            target,
            chance,
            item_consumed: item.map(str::to_owned),
        };

        if !roll_capture(chance, self.rng.as_mut()) {
            return ActionResult::failed(actor, kind, FailureReason::CaptureFailed)
                .with_detail(detail);
        }

        if let Some(captured) = self.remove_participant(target) {
            tracing::info!(%actor, %target, chance, "combatant captured");
            self.side_mut(side).storage.push(Captured {
                id: captured.id,
                fighter: captured.fighter,
            });
        }
        ActionResult::succeeded(actor, kind, detail)
    }

    fn resolve_flee(&mut self, actor: CombatantId, chance: Option<f64>) -> ActionResult {
        let kind = ActionKind::Flee;
        let (_, side) = match self.living_actor(actor) {
            Ok(found) => found,
            Err(reason) => return ActionResult::failed(actor, kind, reason),
        };

        let chance = chance.unwrap_or(self.config.flee.default_chance);
        let detail = ActionDetail::Flee { chance };

        if !roll_flee(chance, self.rng.as_mut()) {
            return ActionResult::failed(actor, kind, FailureReason::FleeFailed).with_detail(detail);
        }

        self.end_battle(BattleResult::Fled { actor, side });
        ActionResult::succeeded(actor, kind, detail)
    }

    fn resolve_wait(&mut self, actor: CombatantId) -> ActionResult {
        match self.living_actor(actor) {
            Ok(_) => ActionResult::succeeded(actor, ActionKind::Wait, ActionDetail::None),
            Err(reason) => ActionResult::failed(actor, ActionKind::Wait, reason),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn roll_damage(&mut self, actor_index: usize, target_index: usize, kind: DamageKind) -> DamageRoll {
        let attacker = self.participants[actor_index].fighter.effective_stats();
        let defender = self.participants[target_index].fighter.effective_stats();
        compute_damage(&attacker, &defender, kind, self.rng.as_mut(), &self.config.damage)
    }

    fn land_hit(
        &mut self,
        target_index: usize,
        roll: DamageRoll,
        mp_spent: u32,
    ) -> ActionDetail {
        let target = &mut self.participants[target_index];
        target.fighter.take_damage(roll.amount);
        let target_hp = target.fighter.vitals().hp;

        ActionDetail::Damage {
            target: target.id,
            roll,
            target_hp,
            defeated: target_hp == 0,
            mp_spent,
            status_applied: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{Catalog, ItemDefinition, SpellDefinition, StatusInfliction};
    use crate::rng::ScriptedRng;
    use crate::state::{Combatant, Inventory, ParticipantSpec, Stats, StatusEffectKind};

    const HERO: CombatantId = CombatantId(1);
    const SLIME: CombatantId = CombatantId(2);

    fn hero() -> Combatant {
        Combatant::new(
            "hero",
            Stats {
                max_hp: 100,
                max_mp: 20,
                attack: 30,
                defense: 10,
                magic_attack: 40,
                magic_defense: 10,
                speed: 20,
                ..Stats::default()
            },
        )
    }

    fn slime() -> Combatant {
        Combatant::new(
            "slime",
            Stats {
                max_hp: 60,
                attack: 12,
                defense: 10,
                magic_defense: 0,
                speed: 5,
                capture_rate: 45,
                ..Stats::default()
            },
        )
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with_spell(
                SpellDefinition::new("venom", "Venom", 5)
                    .with_infliction(StatusInfliction::new(StatusEffectKind::Poison, 2).with_chance(50.0)),
            )
            .with_spell(SpellDefinition::new("nova", "Nova", 50))
            .with_item(ItemDefinition::new("potion", "Potion", ItemEffect::Heal { amount: 30 }))
            .with_item(ItemDefinition::new("net", "Net", ItemEffect::Capture { bonus: 20.0 }))
    }

    fn session(rolls: &[f64]) -> BattleSession {
        let mut session = BattleSession::new(BattleConfig::default())
            .with_catalog(catalog())
            .with_rng(ScriptedRng::new(rolls.iter().copied()))
            .with_inventory(
                Side::Player,
                Inventory::new().with_item("potion", 1).with_item("net", 1),
            );
        session
            .start_battle(vec![
                ParticipantSpec::new(HERO, Side::Player, hero()),
                ParticipantSpec::new(SLIME, Side::Enemy, slime()),
            ])
            .unwrap();
        session
    }

    fn hp(session: &BattleSession, id: CombatantId) -> u32 {
        session.participant(id).unwrap().fighter.vitals().hp
    }

    #[test]
    fn attack_applies_physical_damage_and_advances() {
        let mut session = session(&[0.0, 0.5]);
        let result = session.attack(HERO, SLIME);

        assert!(result.success);
        assert_eq!(result.damage(), Some(17));
        assert_eq!(hp(&session, SLIME), 43);
        assert_eq!(session.current_actor().unwrap().id, SLIME);
    }

    #[test]
    fn rejected_actions_keep_the_turn() {
        let mut session = session(&[0.0]);

        let result = session.attack(SLIME, HERO);
        assert_eq!(result.reason, Some(FailureReason::NotYourTurn));
        assert!(result.was_rejected());

        let result = session.wait(CombatantId(42));
        assert_eq!(result.reason, Some(FailureReason::UnknownActor));
        assert_eq!(session.current_actor().unwrap().id, HERO);
    }

    #[test]
    fn invalid_targets_consume_the_turn() {
        let mut session = session(&[0.0]);
        let result = session.attack(HERO, HERO);
        assert_eq!(result.reason, Some(FailureReason::InvalidTarget));
        assert!(!result.was_rejected());
        assert_eq!(session.current_actor().unwrap().id, SLIME);
    }

    #[test]
    fn insufficient_mp_changes_nothing() {
        let mut session = session(&[0.0]);
        let result = session.magic(HERO, SLIME, "nova", None);

        assert_eq!(result.reason, Some(FailureReason::InsufficientMp));
        assert_eq!(hp(&session, SLIME), 60);
        assert_eq!(session.participant(HERO).unwrap().fighter.vitals().mp, 20);
    }

    #[test]
    fn magic_spends_mp_and_rolls_status_last() {
        // variance, crit, then status
        let mut session = session(&[0.0, 0.5, 0.3]);
        let result = session.magic(HERO, SLIME, "venom", None);

        assert!(result.success);
        assert_eq!(result.damage(), Some(34));
        assert_eq!(session.participant(HERO).unwrap().fighter.vitals().mp, 15);
        match result.detail {
            ActionDetail::Damage {
                status_applied,
                mp_spent,
                ..
            } => {
                assert_eq!(status_applied, Some(StatusEffectKind::Poison));
                assert_eq!(mp_spent, 5);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn unknown_spell_uses_explicit_cost() {
        let mut session = session(&[0.0, 0.5]);
        let result = session.magic(HERO, SLIME, "mystery", Some(4));
        assert!(result.success);
        assert_eq!(session.participant(HERO).unwrap().fighter.vitals().mp, 16);
    }

    #[test]
    fn items_heal_and_are_consumed() {
        let mut session = session(&[0.0]);
        session.participant_mut(HERO).unwrap().fighter.take_damage(50);

        let result = session.use_item(HERO, "potion");
        assert!(result.success);
        assert_eq!(hp(&session, HERO), 80);
        assert_eq!(session.inventory(Side::Player).quantity("potion"), 0);

        session.wait(SLIME);
        let result = session.use_item(HERO, "potion");
        assert_eq!(result.reason, Some(FailureReason::ItemUnavailable));
    }

    #[test]
    fn capture_items_cannot_be_used_directly() {
        let mut session = session(&[0.0]);
        let result = session.use_item(HERO, "net");
        assert_eq!(result.reason, Some(FailureReason::ItemNotUsable));
        assert_eq!(session.inventory(Side::Player).quantity("net"), 1);
    }

    #[test]
    fn failed_capture_still_consumes_item() {
        let mut session = session(&[0.99]);
        let result = session.attempt_capture(HERO, SLIME, Some("net"));

        assert_eq!(result.reason, Some(FailureReason::CaptureFailed));
        // 45 / 3 at full HP, plus the net's 20
        assert!((result.chance().unwrap() - 35.0).abs() < 1e-9);
        assert_eq!(session.inventory(Side::Player).quantity("net"), 0);
        assert_eq!(session.participants().len(), 2);
    }

    #[test]
    fn successful_capture_moves_target_to_storage() {
        let mut session = session(&[0.0]);
        let result = session.attempt_capture(HERO, SLIME, None);

        assert!(result.success);
        assert_eq!(session.participants().len(), 1);
        assert_eq!(session.storage(Side::Player).len(), 1);
        assert_eq!(session.storage(Side::Player)[0].id, SLIME);
        assert_eq!(result.battle_ended, Some(BattleResult::Victory));
    }

    #[test]
    fn flee_ends_battle_on_success() {
        let mut session = session(&[0.0]);
        let result = session.attempt_flee(HERO, Some(10.0));

        assert!(result.success);
        let fled = BattleResult::Fled {
            actor: HERO,
            side: Side::Player,
        };
        assert_eq!(result.battle_ended, Some(fled));
        assert!(!session.is_active());

        let result = session.wait(SLIME);
        assert_eq!(result.reason, Some(FailureReason::BattleInactive));
    }

    #[test]
    fn failed_flee_reports_chance() {
        let mut session = session(&[0.6]);
        let result = session.attempt_flee(HERO, None);
        assert_eq!(result.reason, Some(FailureReason::FleeFailed));
        assert_eq!(result.chance(), Some(50.0));
        assert!(session.is_active());
    }

    #[test]
    fn lethal_attack_ends_battle() {
        let mut session = session(&[0.99, 0.0]);
        session.participant_mut(SLIME).unwrap().fighter.take_damage(55);

        let result = session.attack(HERO, SLIME);
        assert_eq!(result.battle_ended, Some(BattleResult::Victory));
        assert_eq!(session.result(), Some(BattleResult::Victory));
    }

    #[test]
    fn successful_capture_spends_the_last_device() {
        let mut session = session(&[0.0]);
        let result = session.attempt_capture(HERO, SLIME, Some("net"));

        assert!(result.success);
        assert_eq!(session.inventory(Side::Player).quantity("net"), 0);
        assert!(session.inventory(Side::Player).iter().all(|(id, _)| id != "net"));
        assert_eq!(session.storage(Side::Player).len(), 1);
    }

    #[test]
    fn maximal_shield_floors_damage_without_overflow() {
        let mut session = session(&[0.0, 0.5]);
        session
            .apply_status_effect_with_magnitude(SLIME, StatusEffectKind::Shielded, 2, u32::MAX)
            .unwrap();

        let result = session.attack(HERO, SLIME);
        assert!(result.success);
        assert_eq!(result.damage(), Some(1));
        assert_eq!(hp(&session, SLIME), 59);
    }
}
