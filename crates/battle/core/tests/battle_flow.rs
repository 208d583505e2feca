use battle_core::{
    BattleAction, BattleConfig, BattleResult, BattleSession, Catalog, Combatant, CombatantId,
    DamageKind, FailureReason, Inventory, ItemDefinition, ItemEffect, ParticipantSpec, PcgRng,
    ScriptedRng, Side, SpellDefinition, Stats, StatusEffectKind, compute_damage,
};

fn fighter(name: &str, speed: u32) -> Combatant {
    Combatant::new(
        name,
        Stats {
            max_hp: 100,
            max_mp: 10,
            attack: 25,
            defense: 8,
            magic_attack: 18,
            magic_defense: 6,
            speed,
            capture_rate: 50,
            ..Stats::default()
        },
    )
}

fn duel(rng: ScriptedRng) -> BattleSession {
    let catalog = Catalog::new()
        .with_spell(SpellDefinition::new("meteor", "Meteor", 40))
        .with_item(ItemDefinition::new("orb", "Capture Orb", ItemEffect::Capture { bonus: 10.0 }));
    let mut session = BattleSession::new(BattleConfig::default())
        .with_catalog(catalog)
        .with_rng(rng)
        .with_inventory(Side::Player, Inventory::new().with_item("orb", 2));
    session
        .start_battle(vec![
            ParticipantSpec::new(CombatantId(1), Side::Player, fighter("ranger", 30)),
            ParticipantSpec::new(CombatantId(2), Side::Enemy, fighter("goblin", 10)),
        ])
        .unwrap();
    session
}

#[test]
fn three_waits_complete_a_round_in_speed_order() {
    let mut session = BattleSession::default();
    let order: Vec<CombatantId> = session
        .start_battle(vec![
            ParticipantSpec::new(CombatantId(1), Side::Player, fighter("a", 20)),
            ParticipantSpec::new(CombatantId(2), Side::Enemy, fighter("b", 35)),
            ParticipantSpec::new(CombatantId(3), Side::Player, fighter("c", 25)),
        ])
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(order, [CombatantId(2), CombatantId(3), CombatantId(1)]);

    for expected in &order {
        let actor = session.current_actor().unwrap().id;
        assert_eq!(actor, *expected);
        assert_eq!(session.round(), 1);
        assert!(session.wait(actor).success);
    }

    assert_eq!(session.round(), 2);
    assert_eq!(session.current_index(), 0);
}

#[test]
fn poison_ticks_twice_then_stops() {
    let mut session = duel(ScriptedRng::constant(0.5));
    session
        .apply_status_effect(CombatantId(2), StatusEffectKind::Poison, 2)
        .unwrap();

    let hp = |s: &BattleSession| s.participant(CombatantId(2)).unwrap().fighter.vitals().hp;
    session.process_end_of_turn();
    let after_first = hp(&session);
    session.process_end_of_turn();
    let after_second = hp(&session);
    session.process_end_of_turn();

    assert!(after_first < 100);
    assert!(after_second < after_first);
    assert_eq!(hp(&session), after_second);
}

#[test]
fn insufficient_mp_leaves_target_untouched() {
    let mut session = duel(ScriptedRng::constant(0.5));
    let result = session.magic(CombatantId(1), CombatantId(2), "meteor", None);

    assert!(!result.success);
    assert_eq!(result.reason, Some(FailureReason::InsufficientMp));
    assert_eq!(
        session.participant(CombatantId(2)).unwrap().fighter.vitals().hp,
        100
    );
}

#[test]
fn zero_roll_captures_into_storage() {
    let mut session = duel(ScriptedRng::constant(0.0));
    let result = session.attempt_capture(CombatantId(1), CombatantId(2), None);

    assert!(result.success);
    assert!(session.participant(CombatantId(2)).is_none());
    let storage = session.storage(Side::Player);
    assert_eq!(storage.len(), 1);
    assert_eq!(storage[0].fighter.name(), "goblin");
}

#[test]
fn capture_item_is_spent_on_failure() {
    let mut session = duel(ScriptedRng::constant(0.99));
    let result = session.attempt_capture(CombatantId(1), CombatantId(2), Some("orb"));

    assert_eq!(result.reason, Some(FailureReason::CaptureFailed));
    assert_eq!(session.inventory(Side::Player).quantity("orb"), 1);
    assert!(session.participant(CombatantId(2)).is_some());
}

#[test]
fn zero_roll_flee_ends_battle() {
    let mut session = duel(ScriptedRng::constant(0.0));
    let result = session.attempt_flee(CombatantId(1), Some(1.0));

    assert!(result.success);
    assert!(!session.is_active());
    assert_eq!(
        session.result(),
        Some(BattleResult::Fled {
            actor: CombatantId(1),
            side: Side::Player,
        })
    );
}

#[test]
fn out_of_turn_action_is_rejected_without_advancing() {
    let mut session = duel(ScriptedRng::constant(0.5));
    let result = session.attack(CombatantId(2), CombatantId(1));

    assert_eq!(result.reason, Some(FailureReason::NotYourTurn));
    assert_eq!(session.current_actor().unwrap().id, CombatantId(1));
    assert_eq!(session.round(), 1);
}

#[test]
fn inactive_battle_rejects_actions() {
    let mut session = BattleSession::default();
    let result = session.perform_action(BattleAction::wait(CombatantId(1)));
    assert_eq!(result.reason, Some(FailureReason::BattleInactive));
}

#[test]
fn critical_hits_never_deal_less() {
    let attacker = fighter("a", 1).stats;
    let defender = fighter("b", 1).stats;
    let params = BattleConfig::default().damage;

    for variance in [0.0, 0.3, 0.7, 0.99] {
        let mut crit = ScriptedRng::new([variance, 0.0]);
        let mut plain = ScriptedRng::new([variance, 0.9]);
        let crit = compute_damage(&attacker, &defender, DamageKind::Physical, &mut crit, &params);
        let plain = compute_damage(&attacker, &defender, DamageKind::Physical, &mut plain, &params);
        assert!(crit.critical);
        assert!(crit.amount >= plain.amount);
    }
}

#[test]
fn seeded_battles_replay_identically() {
    fn run(seed: u64) -> Vec<(bool, Option<u32>)> {
        let mut session = BattleSession::default().with_rng(PcgRng::new(seed));
        session
            .start_battle(vec![
                ParticipantSpec::new(CombatantId(1), Side::Player, fighter("a", 9)),
                ParticipantSpec::new(CombatantId(2), Side::Enemy, fighter("b", 3)),
            ])
            .unwrap();

        let mut log = Vec::new();
        while session.is_active() && session.round() <= 20 {
            let actor = session.current_actor().unwrap().id;
            let result = session.ai_take_turn(actor);
            log.push((result.success, result.damage()));
        }
        log
    }

    assert_eq!(run(11), run(11));
}
