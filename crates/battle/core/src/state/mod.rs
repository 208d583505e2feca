//! Battle state representation.
//!
//! Combatants, their status effects, participant bookkeeping and per-side
//! resources. The engine mutates these; callers read them back.
pub mod combatant;
pub mod inventory;
pub mod participant;
pub mod status;
pub mod turn;

pub use combatant::{Combatant, CombatantId, Fighter, Side, Stats, Vitals};
pub use inventory::Inventory;
pub use participant::{Captured, Participant, ParticipantSpec, SideState};
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
pub use turn::{BattleResult, TurnState};
