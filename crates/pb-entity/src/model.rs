//! The `BenchEntity` trait — the uniform contract every workload variant
//! implements.

use pb_core::SlotId;
use pb_event::EventRecord;

use crate::context::EngineContext;
use crate::core::EntityCore;

/// One benchmark entity: an addressable unit of simulated work.
///
/// # Contract
///
/// - [`initialize`][Self::initialize] is called once, before the engine
///   starts, and returns the entity's first-wave submissions.
/// - [`handle`][Self::handle] is called once per delivered record.  It
///   performs its payload cost synchronously, then returns zero or more
///   follow-up records.  Every returned time must be strictly after
///   `ctx.now` by at least the configured look-ahead — the engine treats a
///   violation as fatal.
/// - [`release_slot`][Self::release_slot] is the engine's notification that
///   a pooled record this entity staged has been consumed; it always
///   arrives before any handler that could restage the slot runs.
///
/// Handlers never block or suspend: every body is synchronous and
/// bounded-cost so one entity cannot starve dispatch for its siblings.
///
/// Implementations are `Send` so an engine may move entities across worker
/// threads; per-entity state needs no further synchronization because the
/// engine serializes deliveries per entity.
pub trait BenchEntity: Send {
    fn core(&self) -> &EntityCore;

    fn core_mut(&mut self) -> &mut EntityCore;

    /// First-wave submissions.  May return an empty vec (an entity that only
    /// reacts to deliveries, like every bounce entity except the injector).
    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Vec<EventRecord>;

    /// Handle one delivered record: payload cost first, follow-ups after.
    fn handle(&mut self, record: EventRecord, ctx: &mut EngineContext<'_>) -> Vec<EventRecord>;

    /// A pooled record staged from `slot` was consumed by the engine.
    fn release_slot(&mut self, _slot: SlotId) {}

    /// Counters for the end-of-run summary.
    fn stats(&self) -> EntityStats {
        EntityStats::for_core(self.core())
    }
}

/// Per-entity counters reported at the end of a run.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityStats {
    pub name: String,
    /// Events handled by this entity's handler.
    pub handled: u64,
    /// Variant-specific payload operations (memory moves, digests, probes
    /// received, ...).  Zero for variants whose only cost is the counter.
    pub payload_ops: u64,
    /// Slot-pool contract breaches observed (reuse variants only).
    pub staleness_violations: u64,
    /// Circulating records this entity absorbed after its stop flag fell
    /// (phold and bounce).
    pub absorbed: u64,
}

impl EntityStats {
    pub fn for_core(core: &EntityCore) -> Self {
        Self {
            name: core.name().to_owned(),
            handled: core.handled(),
            ..Self::default()
        }
    }
}
