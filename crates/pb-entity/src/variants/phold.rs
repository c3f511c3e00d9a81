//! The classic parameterizable-locality hold pattern.
//!
//! Each entity seeds a fixed number of records; every handled record is,
//! with the configured probability, rerouted to a uniformly random peer,
//! else kept local.  The record itself is the unit of circulation: the
//! receiving handler takes it by value, rewrites destination and time, and
//! resubmits the same value.  The in-flight population is conserved until
//! stop flags start absorbing records.

use pb_core::{BenchResult, EntityId};
use pb_event::{EventRecord, Payload};
use tracing::debug;

use crate::config::EntityConfig;
use crate::context::EngineContext;
use crate::core::EntityCore;
use crate::model::{BenchEntity, EntityStats};

pub struct Phold {
    core: EntityCore,
    initial_events: u64,
    sum: u64,
    absorbed: u64,
}

impl Phold {
    pub fn new(id: EntityId, name: String, cfg: &EntityConfig) -> BenchResult<Self> {
        Ok(Self {
            core: EntityCore::new(id, name, cfg)?,
            initial_events: cfg.initial_events,
            sum: 0,
            absorbed: 0,
        })
    }
}

impl BenchEntity for Phold {
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

    fn handle(&mut self, mut record: EventRecord, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let count = self.core.bump();
        self.sum += 1;
        debug!(id = self.core.id().0, count, "hello world, from phold entity");

        if self.core.should_run() {
            record.dest = self.core.next_dest(ctx.stream);
            record.time = self.core.next_time(ctx.now);
            vec![record]
        } else {
            self.absorbed += 1;
            Vec::new()
        }
    }

    fn stats(&self) -> EntityStats {
        EntityStats {
            absorbed: self.absorbed,
            ..EntityStats::for_core(&self.core)
        }
    }
}
