//! Random sources for the simulator.
//!
//! Every draw the simulator makes goes through [`RandomSource`], so tests can
//! replace the process RNG with a fixed script of values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform value in [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Uniform value in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let v = lo + self.next_unit() * (hi - lo);
        // u close to 1 can round up to the upper bound
        if v >= hi {
            hi - hi.abs().max(1.0) * f64::EPSILON
        } else {
            v
        }
    }

    /// Uniform index in 0..len. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is set, otherwise from OS entropy.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of unit values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    pos: usize,
}

impl ScriptedSource {
    /// Values are clamped into [0, 1).
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, pos: 0 }
    }

    /// Always returns `v`.
    pub fn constant(v: f64) -> Self {
        Self::new(vec![v])
    }

    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}
