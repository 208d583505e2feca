//! Scripted decision making for the player side.

use battle_core::{
    BattleAction, BattleSession, Catalog, CombatantId, ItemEffect, Participant, Side,
};

/// HP fraction below which the pilot drinks a potion.
const HEAL_BELOW: f64 = 0.3;
/// Enemy HP fraction below which the pilot throws a capture device.
const CAPTURE_BELOW: f64 = 0.35;

/// Chooses the player's action: heal when low, capture a weakened enemy,
/// otherwise attack the weakest enemy.
pub fn choose_action(session: &BattleSession, actor: CombatantId) -> BattleAction {
    let Some(me) = session.participant(actor) else {
        return BattleAction::wait(actor);
    };
    let inventory = session.inventory(me.side);
    let catalog = session.catalog();

    if me.fighter.hp_fraction() < HEAL_BELOW {
        if let Some(item) = find_item(catalog, inventory.iter(), |e| matches!(e, ItemEffect::Heal { .. })) {
            return BattleAction::UseItem { actor, item };
        }
    }

    let Some(target) = weakest_enemy(session.participants(), me.side) else {
        return BattleAction::wait(actor);
    };

    if target.fighter.hp_fraction() < CAPTURE_BELOW {
        let device = find_item(catalog, inventory.iter(), |e| matches!(e, ItemEffect::Capture { .. }));
        if device.is_some() {
            return BattleAction::Capture {
                actor,
                target: target.id,
                item: device,
            };
        }
    }

    BattleAction::attack(actor, target.id)
}

fn weakest_enemy(participants: &[Participant], side: Side) -> Option<&Participant> {
    participants
        .iter()
        .filter(|p| p.side != side && p.is_alive())
        .min_by_key(|p| p.fighter.vitals().hp)
}

fn find_item<'a>(
    catalog: &Catalog,
    mut owned: impl Iterator<Item = (&'a str, u32)>,
    wanted: impl Fn(&ItemEffect) -> bool,
) -> Option<String> {
    owned
        .find(|(id, _)| catalog.item(id).is_some_and(|def| wanted(&def.effect)))
        .map(|(id, _)| id.to_owned())
}
