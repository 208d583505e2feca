use battle_core::{
    ActionDetail, ActionKind, AiRegistry, BattleSession, CombatantId, Fighter, ParticipantSpec,
    ScriptedRng, Side, Stats, Vitals,
};

/// Bare-bones fighter with no species and no template behind it.
#[derive(Debug)]
struct Dummy {
    stats: Stats,
    vitals: Vitals,
}

impl Dummy {
    fn new(hp: u32, attack: u32, speed: u32) -> Self {
        let stats = Stats {
            max_hp: hp,
            attack,
            speed,
            ..Stats::default()
        };
        Self {
            vitals: Vitals::full(&stats),
            stats,
        }
    }
}

impl Fighter for Dummy {
    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }
}

#[test]
fn minimal_fighter_falls_back_to_basic_attack() {
    let mut session = BattleSession::default()
        .with_ai(AiRegistry::new())
        .with_rng(ScriptedRng::new([0.0, 0.5]));
    session
        .start_battle(vec![
            ParticipantSpec::new(CombatantId(10), Side::Player, Dummy::new(50, 5, 1)),
            ParticipantSpec::new(CombatantId(20), Side::Enemy, Dummy::new(30, 20, 9)),
        ])
        .unwrap();

    let actor = session.current_actor().unwrap().id;
    assert_eq!(actor, CombatantId(20));

    let result = session.ai_take_turn(actor);
    assert!(result.success);
    assert_eq!(result.kind, ActionKind::Attack);
    assert_eq!(result.damage(), Some(17));
    match result.detail {
        ActionDetail::Damage {
            target, target_hp, ..
        } => {
            assert_eq!(target, CombatantId(10));
            assert_eq!(target_hp, 33);
        }
        other => panic!("unexpected detail: {other:?}"),
    }
    assert_eq!(session.current_actor().unwrap().id, CombatantId(10));
}

#[test]
fn ai_turn_out_of_order_is_rejected_like_a_player_turn() {
    let mut session = BattleSession::default();
    session
        .start_battle(vec![
            ParticipantSpec::new(CombatantId(1), Side::Player, Dummy::new(10, 1, 5)),
            ParticipantSpec::new(CombatantId(2), Side::Enemy, Dummy::new(10, 1, 1)),
        ])
        .unwrap();

    let result = session.ai_take_turn(CombatantId(2));
    assert!(!result.success);
    assert!(result.was_rejected());
    assert_eq!(session.current_actor().unwrap().id, CombatantId(1));
}
