//! Counter-only workload with a fresh record per submission.
//!
//! The allocate/free pedagogical baseline: identical cost to `simple`, but
//! every cycle pays for a transient record instead of reusing a slot.  The
//! trivially correct single-owner semantics also make remote routing safe,
//! so this variant honors the remote-dispatch probability.

use pb_core::{BenchResult, EntityId};
use pb_event::{EventRecord, Payload};
use tracing::debug;

use crate::config::EntityConfig;
use crate::context::EngineContext;
use crate::core::EntityCore;
use crate::model::BenchEntity;

pub struct Alloc {
    core: EntityCore,
    initial_events: u64,
}

impl Alloc {
    pub fn new(id: EntityId, name: String, cfg: &EntityConfig) -> BenchResult<Self> {
        Ok(Self {
            core: EntityCore::new(id, name, cfg)?,
            initial_events: cfg.initial_events,
        })
    }
}

impl BenchEntity for Alloc {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        (0..self.initial_events)
            .map(|_| {
                EventRecord::fresh(self.core.id(), self.core.next_time(ctx.now), Payload::Empty)
            })
            .collect()
    }

    fn handle(&mut self, _record: EventRecord, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let count = self.core.bump();
        debug!(id = self.core.id().0, count, "hello world, from alloc entity");

        if self.core.should_run() {
            let dest = self.core.next_dest(ctx.stream);
            let time = self.core.next_time(ctx.now);
            vec![EventRecord::fresh(dest, time, Payload::Empty)]
        } else {
            Vec::new()
        }
    }
}
