//! `SlotPool` — per-entity staging slots for reused event records.
//!
//! # Why this exists
//!
//! Two of the lifetime strategies reuse the same event storage cycle after
//! cycle instead of allocating per submission:
//!
//! - *single-slot*: one record slot per entity, rewritten every cycle.
//!   Legal only because the engine consumes the previous submission before
//!   the owning handler runs again.
//! - *epoch (double-buffered)*: `depth` full sets of `width` per-destination
//!   slots.  Each cycle stages into the next epoch round-robin, so a slot is
//!   not rewritten until `depth - 1` full cycles after its submission —
//!   bounding staleness regardless of engine delivery latency up to that
//!   many cycles.
//!
//! With move-by-value records the buffers themselves need no protection;
//! what remains worth checking is the *contract*: was a slot ever restaged
//! while a previous submission of it was still in flight?  `SlotPool` tracks
//! per-slot outstanding counts (`mark_submitted` at staging time,
//! `mark_delivered` when the engine consumes the record) and counts every
//! contract breach in [`staleness_violations`](SlotPool::staleness_violations).
//! The epoch depth is deliberately configurable: depth 2 assumes delivery
//! within one cycle, which heavy engine load can exceed.

use pb_core::{BenchError, BenchResult, SlotId};

/// Submission/delivery accounting for a fixed arena of record slots.
#[derive(Debug)]
pub struct SlotPool {
    depth: usize,
    width: usize,
    /// Epoch to stage into on the next `begin_cycle` call.
    epoch: usize,
    /// Per-slot count of submissions not yet consumed by the engine.
    outstanding: Vec<u32>,
    submitted: u64,
    delivered: u64,
    violations: u64,
}

impl SlotPool {
    /// A one-slot pool: the single-slot reuse strategy.
    pub fn single() -> Self {
        Self {
            depth: 1,
            width: 1,
            epoch: 0,
            outstanding: vec![0],
            submitted: 0,
            delivered: 0,
            violations: 0,
        }
    }

    /// An epoch pool with `depth` alternating sets of `width` slots.
    ///
    /// Depth 1 would alias every cycle, defeating the point; at least 2 is
    /// required.  Width 0 is rejected as a configuration error.
    pub fn epochs(depth: usize, width: usize) -> BenchResult<Self> {
        if depth < 2 {
            return Err(BenchError::Config(format!(
                "epoch depth must be at least 2, got {depth}"
            )));
        }
        if width == 0 {
            return Err(BenchError::Config("epoch width must be nonzero".into()));
        }
        Ok(Self {
            depth,
            width,
            epoch: 0,
            outstanding: vec![0; depth * width],
            submitted: 0,
            delivered: 0,
            violations: 0,
        })
    }

    /// Begin a staging cycle: returns the base slot index of the epoch to
    /// write, then advances the epoch pointer round-robin.
    ///
    /// Slots for this cycle are `base .. base + width`.
    pub fn begin_cycle(&mut self) -> u32 {
        let base = (self.epoch * self.width) as u32;
        self.epoch = (self.epoch + 1) % self.depth;
        base
    }

    /// Record that `slot` was staged and submitted.
    ///
    /// Restaging a slot whose previous submission has not been consumed is
    /// the contract breach this pool exists to detect; it is tallied rather
    /// than panicking so a stress run can report the count at the end.
    pub fn mark_submitted(&mut self, slot: SlotId) {
        let s = &mut self.outstanding[slot.index()];
        if *s > 0 {
            self.violations += 1;
        }
        *s += 1;
        self.submitted += 1;
    }

    /// Record that the engine consumed the submission staged in `slot`.
    pub fn mark_delivered(&mut self, slot: SlotId) {
        let s = &mut self.outstanding[slot.index()];
        debug_assert!(*s > 0, "delivery for slot {slot} with nothing in flight");
        *s = s.saturating_sub(1);
        self.delivered += 1;
    }

    /// Submissions of `slot` not yet consumed.
    #[inline]
    pub fn outstanding(&self, slot: SlotId) -> u32 {
        self.outstanding[slot.index()]
    }

    /// Times a slot was restaged while a prior submission was in flight.
    #[inline]
    pub fn staleness_violations(&self) -> u64 {
        self.violations
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}
