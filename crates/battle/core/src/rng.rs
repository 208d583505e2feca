//! RNG oracle for battle randomness.
//!
//! The engine never calls a global random source. Every roll goes through an
//! injected [`RngOracle`], so a seeded [`PcgRng`] replays a battle exactly and
//! tests can script the sequence with [`ScriptedRng`].
//!
//! # Roll order
//!
//! Formulas consume rolls in a fixed order:
//!
//! - damage: variance roll, then critical roll
//! - magic: damage rolls, then one status roll when the spell's infliction
//!   chance is below 100%
//! - capture: a single roll
//! - flee: a single roll

use std::collections::VecDeque;

/// Source of uniform floats in `[0, 1)`.
pub trait RngOracle {
    /// Returns the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Rolls a percentage in `[0, 100)`.
    fn roll_percent(&mut self) -> f64 {
        self.next_f64() * 100.0
    }

    /// Returns true with the given percentage chance.
    ///
    /// A chance of 0 never succeeds; 100 always does.
    fn check(&mut self, chance_percent: f64) -> bool {
        self.roll_percent() < chance_percent
    }

    /// Picks an index in `0..len`. Returns 0 for empty or single-element ranges.
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// Clamps arbitrary input into `[0, 1)`.
fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0 - f64::EPSILON)
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit state, 32-bit output. Same seed, same battle.
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::new(0x853c49e6748fea9b)
    }
}

impl RngOracle for PcgRng {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// Replays a fixed list of values.
///
/// Once the script runs out the last value repeats, so a single-value script
/// forces every roll. An empty script yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<f64>,
    last: f64,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().map(unit_interval).collect(),
            last: 0.0,
        }
    }

    /// Every roll returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RngOracle for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        if let Some(value) = self.values.pop_front() {
            self.last = value;
        }
        self.last
    }
}

/// Adapts any `FnMut() -> f64` closure into an oracle.
pub struct FnRng<F>(pub F);

impl<F: FnMut() -> f64> RngOracle for FnRng<F> {
    fn next_f64(&mut self) -> f64 {
        unit_interval((self.0)())
    }
}

impl<F> std::fmt::Debug for FnRng<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnRng(..)")
    }
}
