//! Battle session: the single owner of battle state.
//!
//! A [`BattleSession`] is constructed explicitly and handed to whatever drives
//! the battle (UI loop, AI loop, test harness). It owns the speed-sorted
//! participants, the turn counters, per-side inventories and storage, the
//! content catalog, the AI registry and the injected RNG.
//!
//! The driving loop is:
//!
//! 1. [`start_battle`](BattleSession::start_battle)
//! 2. [`current_actor`](BattleSession::current_actor)
//! 3. [`perform_action`](BattleSession::perform_action) or
//!    [`ai_take_turn`](BattleSession::ai_take_turn)
//! 4. optionally [`process_end_of_turn`](BattleSession::process_end_of_turn)
//! 5. repeat until [`is_active`](BattleSession::is_active) turns false
mod ai;
mod resolver;
mod status;
mod turns;

use std::fmt;

pub use ai::{
    AiContext, AiPolicy, AiRegistry, BrawlerPolicy, SkittishPolicy, SpellcasterPolicy,
    policy_for_template,
};
pub use status::StatusTick;

use crate::config::BattleConfig;
use crate::env::Catalog;
use crate::rng::{PcgRng, RngOracle};
use crate::state::{
    BattleResult, Captured, CombatantId, Inventory, Participant, Side, SideState, TurnState,
};

/// Explicitly owned battle state plus the collaborators it consults.
pub struct BattleSession {
    config: BattleConfig,
    catalog: Catalog,
    ai: AiRegistry,
    rng: Box<dyn RngOracle>,
    participants: Vec<Participant>,
    turn: TurnState,
    result: Option<BattleResult>,
    /// Both sides were present at start; only then is victory detected.
    contested: bool,
    player: SideState,
    enemy: SideState,
}

impl BattleSession {
    /// Creates an idle session with a default-seeded [`PcgRng`].
    pub fn new(config: BattleConfig) -> Self {
        Self {
            config,
            catalog: Catalog::new(),
            ai: AiRegistry::new(),
            rng: Box::new(PcgRng::default()),
            participants: Vec::new(),
            turn: TurnState::new(),
            result: None,
            contested: false,
            player: SideState::default(),
            enemy: SideState::default(),
        }
    }

    /// Replaces the RNG.
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_ai(mut self, ai: AiRegistry) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_inventory(mut self, side: Side, inventory: Inventory) -> Self {
        self.side_mut(side).inventory = inventory;
        self
    }

    /// Swaps the RNG on a live session.
    pub fn set_rng(&mut self, rng: impl RngOracle + 'static) {
        self.rng = Box::new(rng);
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ai(&self) -> &AiRegistry {
        &self.ai
    }

    pub fn ai_mut(&mut self) -> &mut AiRegistry {
        &mut self.ai
    }

    /// Participants in turn order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: CombatantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Mutable access for callers that adjust a combatant between turns.
    pub fn participant_mut(&mut self, id: CombatantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn round(&self) -> u32 {
        self.turn.round
    }

    pub fn current_index(&self) -> usize {
        self.turn.current_index
    }

    pub fn is_active(&self) -> bool {
        self.turn.active
    }

    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn inventory(&self, side: Side) -> &Inventory {
        &self.side(side).inventory
    }

    /// Combatants captured by `side`, oldest first.
    pub fn storage(&self, side: Side) -> &[Captured] {
        &self.side(side).storage
    }

    fn index_of(&self, id: CombatantId) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }
}

impl Default for BattleSession {
    fn default() -> Self {
        Self::new(BattleConfig::default())
    }
}

impl fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleSession")
            .field("config", &self.config)
            .field("participants", &self.participants)
            .field("turn", &self.turn)
            .field("result", &self.result)
            .field("player", &self.player)
            .field("enemy", &self.enemy)
            .finish_non_exhaustive()
    }
}
