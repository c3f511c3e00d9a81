//! The engine-owned shared random stream, as an injected capability.
//!
//! # Determinism strategy
//!
//! The benchmark suite draws all randomness (destination selection, memory
//! offsets, token placement) from one engine-owned stream.  The stream is
//! never re-seeded per entity, so draws across entities are globally ordered:
//! for a fixed seed and entity count, every run consumes the stream in the
//! same sequence and produces the same event trace.
//!
//! [`RandomStream`] is a trait rather than a concrete type so the stream is
//! injectable — tests substitute [`ScriptedStream`] to force exact draw
//! sequences without fighting a real generator.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomStream ──────────────────────────────────────────────────────────────

/// A source of reproducible uniform randomness.
///
/// The two primitive draws mirror what the destination selector and payload
/// bodies need: a raw `u64` and a uniform `f64` in `[0, 1)`.
pub trait RandomStream {
    /// Next uniformly distributed `u64`.
    fn next_u64(&mut self) -> u64;

    /// Next uniform `f64` in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index into a collection of length `len`.
    ///
    /// Modulo reduction is fine here: the bias at benchmark-scale `len`
    /// values is far below measurement noise.  `len` must be nonzero.
    #[inline]
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    /// `true` with probability `p`.  `p <= 0` never fires; `p >= 1` always.
    #[inline]
    fn next_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

// ── SharedStream ──────────────────────────────────────────────────────────────

/// The production stream: a seeded `SmallRng`.
///
/// `SmallRng` is not cryptographic, which is exactly right for a workload
/// generator — fast, small state, fully determined by its seed.
pub struct SharedStream(SmallRng);

impl SharedStream {
    pub fn new(seed: u64) -> Self {
        SharedStream(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent stream with a different seed offset — used
    /// when a fixture needs a second stream that will not disturb the
    /// engine's draw sequence.
    pub fn derive(&mut self, offset: u64) -> SharedStream {
        let seed = self.0.next_u64() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SharedStream(SmallRng::seed_from_u64(seed))
    }
}

impl RandomStream for SharedStream {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn next_f64(&mut self) -> f64 {
        // 53 random mantissa bits → uniform in [0, 1).
        (self.0.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

// ── ScriptedStream ────────────────────────────────────────────────────────────

/// A test fixture stream that replays pre-recorded draws.
///
/// `next_u64` and `next_f64` pop from separate queues so a test can script
/// destination picks and probability rolls independently.  Popping an empty
/// queue panics — a scripted test that draws more than it scripted is broken.
#[derive(Default)]
pub struct ScriptedStream {
    u64s: VecDeque<u64>,
    f64s: VecDeque<f64>,
}

impl ScriptedStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_u64s(mut self, draws: impl IntoIterator<Item = u64>) -> Self {
        self.u64s.extend(draws);
        self
    }

    pub fn push_f64s(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.f64s.extend(draws);
        self
    }

    /// Draws remaining across both queues.
    pub fn remaining(&self) -> usize {
        self.u64s.len() + self.f64s.len()
    }
}

impl RandomStream for ScriptedStream {
    fn next_u64(&mut self) -> u64 {
        self.u64s.pop_front().expect("scripted u64 draws exhausted")
    }

    fn next_f64(&mut self) -> f64 {
        self.f64s.pop_front().expect("scripted f64 draws exhausted")
    }
}
