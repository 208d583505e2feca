//! AI decision making for non-player turns.
//!
//! A species may register an [`AiPolicy`]. When the policy has nothing to
//! offer, or the species has none, the actor falls back to a basic attack on
//! the first living opponent in turn order, and waits if there is none.
//! Either way the caller gets the same [`ActionResult`] a player action
//! produces.

use std::collections::HashMap;
use std::fmt;

use crate::action::{ActionResult, BattleAction};
use crate::env::{Catalog, SpeciesTemplate};
use crate::rng::RngOracle;
use crate::state::{CombatantId, Participant};

use super::BattleSession;

/// Read-only view of the battle handed to a policy.
#[derive(Clone, Copy)]
pub struct AiContext<'a> {
    pub actor: &'a Participant,
    /// All participants in turn order, the actor included.
    pub participants: &'a [Participant],
    pub round: u32,
    pub catalog: &'a Catalog,
}

impl<'a> AiContext<'a> {
    /// Living participants on the other side, in turn order.
    pub fn opponents(&self) -> impl Iterator<Item = &'a Participant> + 'a {
        let side = self.actor.side;
        self.participants
            .iter()
            .filter(move |p| p.side != side && p.is_alive())
    }

    /// Living participants on the actor's side, excluding the actor.
    pub fn allies(&self) -> impl Iterator<Item = &'a Participant> + 'a {
        let (side, id) = (self.actor.side, self.actor.id);
        self.participants
            .iter()
            .filter(move |p| p.side == side && p.id != id && p.is_alive())
    }

    /// Living opponent with the lowest current HP; earliest in turn order on ties.
    pub fn weakest_opponent(&self) -> Option<&'a Participant> {
        self.opponents().min_by_key(|p| p.fighter.vitals().hp)
    }
}

impl fmt::Debug for AiContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiContext")
            .field("actor", &self.actor.id)
            .field("participants", &self.participants.len())
            .field("round", &self.round)
            .finish()
    }
}

/// Species-level decision logic.
pub trait AiPolicy: fmt::Debug {
    /// Picks an action for `ctx.actor`, or `None` to use the basic attack.
    fn choose_action(&self, ctx: &AiContext<'_>, rng: &mut dyn RngOracle) -> Option<BattleAction>;
}

/// Casts a signature spell with some probability when MP allows.
#[derive(Clone, Debug, PartialEq)]
pub struct SpellcasterPolicy {
    pub spell: String,
    /// Percentage chance to cast when affordable.
    pub chance: f64,
}

impl SpellcasterPolicy {
    pub fn new(spell: impl Into<String>, chance: f64) -> Self {
        Self {
            spell: spell.into(),
            chance,
        }
    }
}

impl AiPolicy for SpellcasterPolicy {
    fn choose_action(&self, ctx: &AiContext<'_>, rng: &mut dyn RngOracle) -> Option<BattleAction> {
        let cost = ctx.catalog.spell(&self.spell).map_or(0, |s| s.mp_cost);
        if ctx.actor.fighter.vitals().mp < cost {
            return None;
        }
        let target = ctx.opponents().next()?;
        if !rng.check(self.chance) {
            return None;
        }
        tracing::debug!(actor = %ctx.actor.id, spell = %self.spell, "casting special");
        Some(BattleAction::magic(ctx.actor.id, target.id, self.spell.clone()))
    }
}

/// Always goes after the opponent with the least HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrawlerPolicy;

impl AiPolicy for BrawlerPolicy {
    fn choose_action(&self, ctx: &AiContext<'_>, _rng: &mut dyn RngOracle) -> Option<BattleAction> {
        let target = ctx.weakest_opponent()?;
        Some(BattleAction::attack(ctx.actor.id, target.id))
    }
}

/// Tries to flee once HP falls below a fraction of max.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkittishPolicy {
    /// HP fraction in `[0, 1]`.
    pub threshold: f64,
}

impl Default for SkittishPolicy {
    fn default() -> Self {
        Self { threshold: 0.25 }
    }
}

impl AiPolicy for SkittishPolicy {
    fn choose_action(&self, ctx: &AiContext<'_>, _rng: &mut dyn RngOracle) -> Option<BattleAction> {
        if ctx.actor.fighter.hp_fraction() >= self.threshold {
            return None;
        }
        Some(BattleAction::Flee {
            actor: ctx.actor.id,
            chance: None,
        })
    }
}

/// Builds the built-in policy a template names, if any.
///
/// Known keys: `spellcaster` (first spell in the template's list),
/// `brawler`, `skittish`.
pub fn policy_for_template(template: &SpeciesTemplate) -> Option<Box<dyn AiPolicy>> {
    let key = template.ai.as_deref()?;
    match key {
        "spellcaster" => {
            let spell = template.spells.first()?;
            Some(Box::new(SpellcasterPolicy::new(spell.clone(), 50.0)))
        }
        "brawler" => Some(Box::new(BrawlerPolicy)),
        "skittish" => Some(Box::new(SkittishPolicy::default())),
        other => {
            tracing::warn!(species = %template.id, policy = other, "unknown AI policy key");
            None
        }
    }
}

/// Policies keyed by species id.
#[derive(Debug, Default)]
pub struct AiRegistry {
    policies: HashMap<String, Box<dyn AiPolicy>>,
}

impl AiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the built-in policy of every template in the catalog that names one.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut registry = Self::new();
        for id in catalog.species_ids() {
            if let Some(policy) = catalog.species(id).and_then(policy_for_template) {
                registry.policies.insert(id.to_owned(), policy);
            }
        }
        registry
    }

    /// Registers `policy` for `species`, replacing any previous one.
    pub fn register(&mut self, species: impl Into<String>, policy: impl AiPolicy + 'static) {
        self.policies.insert(species.into(), Box::new(policy));
    }

    pub fn with(mut self, species: impl Into<String>, policy: impl AiPolicy + 'static) -> Self {
        self.register(species, policy);
        self
    }

    pub fn get(&self, species: &str) -> Option<&dyn AiPolicy> {
        self.policies.get(species).map(|policy| &**policy)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

/// AI turn methods for BattleSession.
impl BattleSession {
    /// Chooses and performs an action for `actor`.
    pub fn ai_take_turn(&mut self, actor: CombatantId) -> ActionResult {
        let action = self.choose_ai_action(actor);
        self.perform_action(action)
    }

    fn choose_ai_action(&mut self, actor: CombatantId) -> BattleAction {
        let Some(participant) = self.participants.iter().find(|p| p.id == actor) else {
            return BattleAction::wait(actor);
        };
        let ctx = AiContext {
            actor: participant,
            participants: &self.participants,
            round: self.turn.round,
            catalog: &self.catalog,
        };

        let policy = participant
            .fighter
            .species()
            .and_then(|species| self.ai.get(species));
        if let Some(policy) = policy {
            match policy.choose_action(&ctx, self.rng.as_mut()) {
                Some(action) if action.actor() == actor => return action,
                Some(action) => {
                    tracing::warn!(%actor, chosen = %action.actor(), "policy chose for another actor; ignoring");
                }
                None => {}
            }
        }

        match ctx.opponents().next() {
            Some(target) => {
                tracing::debug!(%actor, opponent = %target.id, "no AI policy decision; basic attack");
                BattleAction::attack(actor, target.id)
            }
            None => BattleAction::wait(actor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SpellDefinition;
    use crate::rng::ScriptedRng;
    use crate::state::{Combatant, ParticipantSpec, Side, Stats};

    fn unit(name: &str, species: &str, hp: u32, speed: u32) -> Combatant {
        Combatant::new(
            name,
            Stats {
                max_hp: 100,
                max_mp: 10,
                attack: 20,
                magic_attack: 20,
                speed,
                ..Stats::default()
            },
        )
        .with_species(species)
        .with_hp(hp)
    }

    fn battle(registry: AiRegistry, rolls: &[f64]) -> BattleSession {
        let catalog = Catalog::new().with_spell(SpellDefinition::new("ember", "Ember", 4));
        let mut session = BattleSession::default()
            .with_catalog(catalog)
            .with_ai(registry)
            .with_rng(ScriptedRng::new(rolls.iter().copied()));
        session
            .start_battle(vec![
                ParticipantSpec::new(CombatantId(1), Side::Enemy, unit("imp", "imp", 100, 30)),
                ParticipantSpec::new(CombatantId(2), Side::Player, unit("knight", "human", 80, 20)),
                ParticipantSpec::new(CombatantId(3), Side::Player, unit("mage", "human", 40, 10)),
            ])
            .unwrap();
        session
    }

    #[test]
    fn fallback_attacks_first_living_opponent() {
        let mut session = battle(AiRegistry::new(), &[0.0, 0.5]);
        let result = session.ai_take_turn(CombatantId(1));

        assert!(result.success);
        assert_eq!(result.kind, crate::action::ActionKind::Attack);
        match result.detail {
            crate::action::ActionDetail::Damage { target, .. } => assert_eq!(target, CombatantId(2)),
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn brawler_targets_weakest() {
        let registry = AiRegistry::new().with("imp", BrawlerPolicy);
        let mut session = battle(registry, &[0.0, 0.5]);
        let result = session.ai_take_turn(CombatantId(1));
        match result.detail {
            crate::action::ActionDetail::Damage { target, .. } => assert_eq!(target, CombatantId(3)),
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn spellcaster_is_rng_gated() {
        let registry = AiRegistry::new().with("imp", SpellcasterPolicy::new("ember", 50.0));

        let mut session = battle(registry, &[0.1, 0.0, 0.5]);
        let result = session.ai_take_turn(CombatantId(1));
        assert_eq!(result.kind, crate::action::ActionKind::Magic);

        let registry = AiRegistry::new().with("imp", SpellcasterPolicy::new("ember", 50.0));
        let mut session = battle(registry, &[0.9, 0.0, 0.5]);
        let result = session.ai_take_turn(CombatantId(1));
        assert_eq!(result.kind, crate::action::ActionKind::Attack);
    }

    #[test]
    fn skittish_flees_when_hurt() {
        let registry = AiRegistry::new().with("human", SkittishPolicy { threshold: 0.5 });
        let mut session = battle(registry, &[0.99, 0.5, 0.0]);

        // imp attacks, then the healthy knight falls back to attacking
        session.ai_take_turn(CombatantId(1));
        let knight = session.ai_take_turn(CombatantId(2));
        assert_eq!(knight.kind, crate::action::ActionKind::Attack);

        let mage = session.ai_take_turn(CombatantId(3));
        assert_eq!(mage.kind, crate::action::ActionKind::Flee);
        assert!(mage.success);
        assert!(!session.is_active());
    }

    #[test]
    fn registry_builds_from_catalog_keys() {
        let base = Stats {
            max_hp: 10,
            ..Stats::default()
        };
        let mut caster = SpeciesTemplate::new("wisp", "Wisp", base).with_ai("spellcaster");
        caster.spells.push("ember".into());
        let catalog = Catalog::new()
            .with_species(caster)
            .with_species(SpeciesTemplate::new("wolf", "Wolf", base).with_ai("brawler"))
            .with_species(SpeciesTemplate::new("rock", "Rock", base).with_ai("dance"))
            .with_species(SpeciesTemplate::new("slug", "Slug", base));

        let registry = AiRegistry::from_catalog(&catalog);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("wisp").is_some());
        assert!(registry.get("rock").is_none());
    }

    #[test]
    fn waits_when_no_opponent_is_alive() {
        let mut session = BattleSession::default();
        session
            .start_battle(vec![ParticipantSpec::new(
                CombatantId(1),
                Side::Enemy,
                unit("imp", "imp", 100, 1),
            )])
            .unwrap();
        let result = session.ai_take_turn(CombatantId(1));
        assert_eq!(result.kind, crate::action::ActionKind::Wait);
        assert!(result.success);
    }
}
