//! The event record: one scheduled unit of work.

use pb_core::{EntityId, EventTime, SlotId, TokenId};

// ── Payload ───────────────────────────────────────────────────────────────────

/// Variant-specific event payload.
///
/// A closed tagged union rather than an opaque byte block: every benchmark
/// variant's payload is a few machine words, and the tag doubles as the
/// dispatch discriminant inside handlers that receive more than one event
/// kind (the fan-out variant's own cycle event vs. incoming probes).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// No payload at all.
    Empty,

    /// Integer triple incremented on every hop (counter workloads).
    Counters { a: i64, b: i64, c: i64 },

    /// Byte offset into the receiving entity's private buffer, produced by
    /// the previous move cycle (memory workload).
    Block { offset: u64 },

    /// The fan-out variant's own self-scheduled cycle driver.
    Cycle,

    /// A fan-out probe sent to a random peer; counted, never answered.
    Probe,

    /// A conserved circulating token (bounce workload).
    Token(TokenId),
}

// ── Provenance ────────────────────────────────────────────────────────────────

/// Where a record was staged from, for lifetime accounting.
///
/// The engine inspects provenance once, immediately before dispatch: a
/// `Slot` record causes a `release_slot` callback on the origin entity so
/// its pool knows the staging slot may be rewritten.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// Transient record — allocated for this submission, consumed by the
    /// receiving handler.  No accounting.
    Fresh,

    /// Staged from `slot` of `origin`'s [`SlotPool`](crate::SlotPool).
    Slot { origin: EntityId, slot: SlotId },
}

// ── EventRecord ───────────────────────────────────────────────────────────────

/// A scheduled unit of work bound to one destination entity and one strictly
/// future event time.
///
/// Records are plain values.  Submission moves the record into the engine
/// queue; delivery moves it out into the handler, which may mutate and
/// resubmit the same value (the token and phold regimes) or drop it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub dest: EntityId,
    pub time: EventTime,
    pub payload: Payload,
    pub provenance: Provenance,
}

impl EventRecord {
    /// A transient record with no lifetime accounting.
    #[inline]
    pub fn fresh(dest: EntityId, time: EventTime, payload: Payload) -> Self {
        Self { dest, time, payload, provenance: Provenance::Fresh }
    }

    /// A record staged from a pool slot owned by `origin`.
    #[inline]
    pub fn pooled(
        dest: EntityId,
        time: EventTime,
        payload: Payload,
        origin: EntityId,
        slot: SlotId,
    ) -> Self {
        Self { dest, time, payload, provenance: Provenance::Slot { origin, slot } }
    }
}
