//! Turn-based battle rules: initiative, action resolution and combat math.
//!
//! `battle-core` owns the canonical combat rules. A caller builds a
//! [`BattleSession`], starts a battle with a participant list, and then
//! submits one [`BattleAction`] per turn (or lets [`BattleSession::ai_take_turn`]
//! pick one). Every action answers with an [`ActionResult`]; rule violations
//! are reported there rather than as errors. All randomness comes from an
//! injected [`RngOracle`], so a seeded battle replays exactly.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{ActionDetail, ActionKind, ActionResult, BattleAction, FailureReason, ItemApplied};
pub use combat::{
    CaptureModifiers, DamageKind, DamageRoll, compute_capture_chance, compute_damage, roll_capture,
    roll_flee,
};
pub use config::{BattleConfig, CaptureParams, DamageParams, FleeParams};
pub use engine::{
    AiContext, AiPolicy, AiRegistry, BattleSession, BrawlerPolicy, SkittishPolicy,
    SpellcasterPolicy, StatusTick,
};
pub use env::{
    Catalog, GrowthCurve, ItemDefinition, ItemEffect, SpeciesTemplate, SpellDefinition,
    StatusInfliction,
};
pub use error::{BattleError, ErrorSeverity, GameError};
pub use rng::{FnRng, PcgRng, RngOracle, ScriptedRng};
pub use state::{
    BattleResult, Captured, Combatant, CombatantId, Fighter, Inventory, Participant,
    ParticipantSpec, Side, SideState, Stats, StatusEffect, StatusEffectKind, StatusEffects,
    TurnState, Vitals,
};
