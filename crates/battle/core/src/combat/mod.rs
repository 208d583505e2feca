//! Combat math.
//!
//! Pure functions for damage, capture and flee resolution. They read stats,
//! consume rolls from the injected RNG and never fail: out-of-range inputs are
//! clamped rather than rejected.
//!
//! - `compute_damage`: offense vs defense with variance and critical hits
//! - `compute_capture_chance`: HP fraction and species rate, clamped
//! - `roll_capture` / `roll_flee`: a single roll against a percentage

pub mod capture;
pub mod damage;
pub mod flee;

pub use capture::{CaptureModifiers, compute_capture_chance, roll_capture};
pub use damage::{DamageKind, DamageRoll, apply_power, compute_damage};
pub use flee::roll_flee;
