//! Counter-only workload, single reused record slot.
//!
//! The near-zero-cost baseline: each handled event increments the counter
//! triple and restages the one slot for the next cycle.  Isolates pure
//! scheduling overhead.  Self-routed by contract — the slot is only safe to
//! rewrite because the engine consumed the previous submission before this
//! handler ran.

use pb_core::{BenchResult, EntityId, SlotId};
use pb_event::{EventRecord, Payload, SlotPool};
use tracing::debug;

use crate::config::EntityConfig;
use crate::context::EngineContext;
use crate::core::EntityCore;
use crate::model::{BenchEntity, EntityStats};

const SLOT: SlotId = SlotId(0);

pub struct Simple {
    core: EntityCore,
    slot: SlotPool,
}

impl Simple {
    pub fn new(id: EntityId, name: String, cfg: &EntityConfig) -> BenchResult<Self> {
        Ok(Self {
            core: EntityCore::new(id, name, cfg)?,
            slot: SlotPool::single(),
        })
    }

    fn stage(&mut self, ctx: &EngineContext<'_>, payload: Payload) -> EventRecord {
        let time = self.core.next_time(ctx.now);
        self.slot.mark_submitted(SLOT);
        EventRecord::pooled(self.core.id(), time, payload, self.core.id(), SLOT)
    }
}

impl BenchEntity for Simple {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let id = self.core.id().0 as i64;
        vec![self.stage(ctx, Payload::Counters { a: -id, b: id, c: id })]
    }

    fn handle(&mut self, record: EventRecord, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let count = self.core.bump();
        debug!(id = self.core.id().0, count, "hello world, from simple entity");

        let Payload::Counters { a, b, c } = record.payload else {
            return Vec::new();
        };
        let next = Payload::Counters { a: a + 1, b: b + 1, c: c + 1 };

        if self.core.should_run() {
            vec![self.stage(ctx, next)]
        } else {
            Vec::new()
        }
    }

    fn release_slot(&mut self, slot: SlotId) {
        self.slot.mark_delivered(slot);
    }

    fn stats(&self) -> EntityStats {
        EntityStats {
            staleness_violations: self.slot.staleness_violations(),
            ..EntityStats::for_core(&self.core)
        }
    }
}
