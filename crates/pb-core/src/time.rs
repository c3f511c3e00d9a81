//! Virtual-time model: ticks, (tick, epsilon) event times, and the
//! look-ahead/stagger policy that generates them.
//!
//! # Design
//!
//! Simulated time is a pair: a coarse `Tick` counter plus a small `epsilon`
//! ordinal that gives events at the same tick a deterministic relative order.
//! Epsilon has no physical meaning — it exists purely as a tie-break.
//!
//! All future times are produced through [`TimePolicy::next_time`], which is
//! a pure function of (current time, entity identity, handled count).  Wall
//! clock and thread identity never enter the computation, so a run's event
//! times are reproducible for a fixed seed regardless of how the engine is
//! threaded.

use std::fmt;

use crate::EntityId;
use crate::error::{BenchError, BenchResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulated-time tick counter.
///
/// Stored as `u64`: benchmark runs dispatch at most a few billion events, so
/// overflow is not a practical concern even with per-identity staggering.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── EventTime ─────────────────────────────────────────────────────────────────

/// A full event timestamp: coarse tick plus fine-grained tie-break ordinal.
///
/// Derived `Ord` is lexicographic over (tick, epsilon), which is exactly the
/// global dispatch order the engine uses.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventTime {
    pub tick: Tick,
    pub epsilon: u32,
}

impl EventTime {
    pub const ZERO: EventTime = EventTime { tick: Tick::ZERO, epsilon: 0 };

    #[inline]
    pub fn new(tick: u64, epsilon: u32) -> Self {
        Self { tick: Tick(tick), epsilon }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tick, self.epsilon)
    }
}

// ── TimePolicy ────────────────────────────────────────────────────────────────

/// Default spread width for per-identity tick staggering.
pub const DEFAULT_TICK_STAGGER_MODULUS: u64 = 64;

/// Default modulus for the shifty-epsilon tie-break rotation.
pub const DEFAULT_EPSILON_MODULUS: u64 = 64;

/// Generates strictly-future event times under a look-ahead constraint.
///
/// `tick' = tick + look_ahead (+ id % tick_stagger_modulus, if staggering)`
/// `epsilon' = (id + count) % epsilon_modulus` when shifty epsilon is on,
/// else `0`.
///
/// Tick staggering is an anti-thundering-herd device: without it every
/// entity at time zero schedules for the identical first tick, handing the
/// engine one massive simultaneous-tick batch.  Shifty epsilon rotates an
/// entity's tie-break position cycle over cycle to exercise the engine's
/// same-tick ordering path rather than always hitting the same order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimePolicy {
    look_ahead: u64,
    stagger_tick: bool,
    stagger_epsilon: bool,
    tick_stagger_modulus: u64,
    epsilon_modulus: u64,
}

impl TimePolicy {
    /// Create a policy with the given look-ahead and both staggers off.
    ///
    /// A look-ahead of zero would allow same-instant self-scheduling, which
    /// breaks the strict-future invariant — rejected here rather than
    /// checked per event.
    pub fn new(look_ahead: u64) -> BenchResult<Self> {
        if look_ahead == 0 {
            return Err(BenchError::Config(
                "look-ahead must be at least 1 tick".into(),
            ));
        }
        Ok(Self {
            look_ahead,
            stagger_tick: false,
            stagger_epsilon: false,
            tick_stagger_modulus: DEFAULT_TICK_STAGGER_MODULUS,
            epsilon_modulus: DEFAULT_EPSILON_MODULUS,
        })
    }

    pub fn with_stagger_tick(mut self, on: bool) -> Self {
        self.stagger_tick = on;
        self
    }

    pub fn with_stagger_epsilon(mut self, on: bool) -> Self {
        self.stagger_epsilon = on;
        self
    }

    /// Override the stagger spread widths.  Zero moduli are rejected.
    pub fn with_moduli(mut self, tick_modulus: u64, epsilon_modulus: u64) -> BenchResult<Self> {
        if tick_modulus == 0 || epsilon_modulus == 0 {
            return Err(BenchError::Config("stagger moduli must be nonzero".into()));
        }
        self.tick_stagger_modulus = tick_modulus;
        self.epsilon_modulus = epsilon_modulus;
        Ok(self)
    }

    #[inline]
    pub fn look_ahead(&self) -> u64 {
        self.look_ahead
    }

    #[inline]
    pub fn stagger_tick(&self) -> bool {
        self.stagger_tick
    }

    /// Compute the next event time for an entity executing at `now`.
    ///
    /// Pure in (now, id, count): calling it twice with the same arguments
    /// yields the same time.  The result is always strictly greater than
    /// `now` and at least `look_ahead` ticks ahead.
    #[inline]
    pub fn next_time(&self, now: EventTime, id: EntityId, count: u64) -> EventTime {
        let mut tick = now.tick.0 + self.look_ahead;
        if self.stagger_tick {
            tick += id.0 as u64 % self.tick_stagger_modulus;
        }
        let epsilon = if self.stagger_epsilon {
            ((id.0 as u64 + count) % self.epsilon_modulus) as u32
        } else {
            0
        };
        EventTime { tick: Tick(tick), epsilon }
    }
}
