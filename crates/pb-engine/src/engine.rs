//! The sequential dispatch engine.

use pb_core::{EntityId, EventTime, RandomStream};
use pb_entity::{BenchEntity, EngineContext, EntityStats, StopHandle};
use pb_event::{EventRecord, Provenance};
use tracing::trace;

use crate::error::{EngineError, EngineResult};
use crate::observer::EngineObserver;
use crate::queue::EventQueue;

/// End-of-run summary: total dispatches plus every entity's counters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunStats {
    pub dispatched: u64,
    pub entities: Vec<EntityStats>,
}

/// Single-threaded reference engine.
///
/// Owns the entities, the pending-event queue, and the shared random
/// stream.  Everything the engine does is a pure function of its seed, the
/// entity set, and the stop-flag schedule, so two identically configured
/// runs produce byte-identical dispatch traces.
pub struct Engine {
    entities: Vec<Box<dyn BenchEntity>>,
    queue: EventQueue,
    stream: Box<dyn RandomStream>,
    now: EventTime,
    look_ahead: u64,
    dispatched: u64,
}

impl Engine {
    /// Assemble an engine from prebuilt entities.  [`EngineBuilder`] is the
    /// normal construction path; this is public for harnesses and tests
    /// that wire entities by hand.
    ///
    /// [`EngineBuilder`]: crate::EngineBuilder
    pub fn new(
        entities: Vec<Box<dyn BenchEntity>>,
        stream: Box<dyn RandomStream>,
        look_ahead: u64,
    ) -> Self {
        Self {
            entities,
            queue: EventQueue::new(),
            stream,
            now: EventTime::ZERO,
            look_ahead,
            dispatched: 0,
        }
    }

    /// Run every entity's `initialize` and enqueue the first wave.
    ///
    /// Initialization happens at time zero in entity-id order, so first-wave
    /// draws consume the stream in a fixed sequence.
    pub fn seed(&mut self) -> EngineResult<()> {
        let Self { entities, stream, look_ahead, .. } = self;
        let mut staged = Vec::new();
        for entity in entities.iter_mut() {
            let mut ctx = EngineContext::new(EventTime::ZERO, stream.as_mut());
            for record in entity.initialize(&mut ctx) {
                check_causality(entity.core().id(), EventTime::ZERO, &record, *look_ahead)?;
                staged.push(record);
            }
        }
        for record in staged {
            self.queue.push(record);
        }
        Ok(())
    }

    /// Dispatch the single earliest record.  Returns `Ok(false)` when the
    /// queue is empty.
    pub fn step(&mut self, observer: &mut dyn EngineObserver) -> EngineResult<bool> {
        let Some(record) = self.queue.pop() else {
            return Ok(false);
        };

        // ① Advance.
        self.now = record.time;

        // ② Release.  The origin's pool learns the slot is consumable
        // before any handler that could restage it runs.
        if let Provenance::Slot { origin, slot } = record.provenance {
            self.entities[origin.index()].release_slot(slot);
        }

        // ③ Dispatch.
        observer.on_dispatch(record.dest, record.time);
        trace!(dest = %record.dest, time = %record.time, "dispatch");
        let Self { entities, stream, now, look_ahead, .. } = self;
        let entity = &mut entities[record.dest.index()];
        let origin = entity.core().id();
        let mut ctx = EngineContext::new(*now, stream.as_mut());
        let outputs = entity.handle(record, &mut ctx);
        self.dispatched += 1;

        // ④ Submit.
        for out in outputs {
            check_causality(origin, *now, &out, *look_ahead)?;
            observer.on_submit(origin, out.dest, out.time);
            self.queue.push(out);
        }
        Ok(true)
    }

    /// Dispatch until the queue drains.
    pub fn run(&mut self, observer: &mut dyn EngineObserver) -> EngineResult<RunStats> {
        self.run_until(observer, |_| false)
    }

    /// Dispatch until the queue drains or `done` reports true.  `done` is
    /// consulted between dispatches, never mid-handler.
    pub fn run_until(
        &mut self,
        observer: &mut dyn EngineObserver,
        mut done: impl FnMut(&Engine) -> bool,
    ) -> EngineResult<RunStats> {
        while !done(self) {
            if !self.step(observer)? {
                break;
            }
        }
        observer.on_run_end(self.dispatched);
        Ok(self.stats())
    }

    // ── Stop control ──────────────────────────────────────────────────────

    /// Flip every entity's stop flag.  Circulating records drain lazily.
    pub fn stop_all(&self) {
        for entity in &self.entities {
            entity.core().stop();
        }
    }

    pub fn stop_entity(&self, id: EntityId) {
        self.entities[id.index()].core().stop();
    }

    /// Handles usable from another thread (the timed-run controller).
    pub fn stop_handles(&self) -> Vec<StopHandle> {
        self.entities.iter().map(|e| e.core().stop_handle()).collect()
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn entity_handled(&self, id: EntityId) -> u64 {
        self.entities[id.index()].core().handled()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn now(&self) -> EventTime {
        self.now
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            dispatched: self.dispatched,
            entities: self.entities.iter().map(|e| e.stats()).collect(),
        }
    }
}

/// A submitted time must sit at least `look_ahead` whole ticks past `now`.
fn check_causality(
    entity: EntityId,
    now: EventTime,
    record: &EventRecord,
    look_ahead: u64,
) -> EngineResult<()> {
    if record.time.tick.0 < now.tick.0 + look_ahead {
        return Err(EngineError::Causality {
            entity,
            now,
            scheduled: record.time,
            look_ahead,
        });
    }
    Ok(())
}
