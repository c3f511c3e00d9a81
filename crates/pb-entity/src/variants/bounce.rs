//! Token-bounce workload: a fixed, conserved population of records
//! circulating through the entity graph.
//!
//! Entity 0 injects the whole token population at uniformly random initial
//! destinations; every receiving handler rewrites the same record's
//! destination and time and resends it.  A token's effective owner changes
//! each delivery — safe because at most one handler holds a given record at
//! a time (the engine's single-delivery guarantee).  Once a stop flag falls,
//! the receiving entity absorbs tokens instead of forwarding them.

use pb_core::{BenchResult, EntityId};
use pb_event::{EventRecord, Payload, TokenPool};
use tracing::debug;

use crate::config::EntityConfig;
use crate::context::EngineContext;
use crate::core::EntityCore;
use crate::model::{BenchEntity, EntityStats};

pub struct Bounce {
    core: EntityCore,
    /// Present only on the injector (entity 0).
    injector: Option<TokenPool>,
    absorbed: u64,
}

impl Bounce {
    pub fn new(id: EntityId, name: String, cfg: &EntityConfig) -> BenchResult<Self> {
        let injector = if id.0 == 0 {
            Some(TokenPool::new(cfg.tokens)?)
        } else {
            None
        };
        Ok(Self {
            core: EntityCore::new(id, name, cfg)?,
            injector,
            absorbed: 0,
        })
    }
}

impl BenchEntity for Bounce {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let Some(pool) = self.injector.as_mut() else {
            return Vec::new();
        };
        let Some(peers) = self.core.peers() else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(pool.size() as usize);
        while let Some(token) = pool.launch() {
            let dest = peers.uniform(ctx.stream);
            let time = self.core.next_time(ctx.now);
            out.push(EventRecord::fresh(dest, time, Payload::Token(token)));
        }
        out
    }

    fn handle(&mut self, mut record: EventRecord, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let count = self.core.bump();
        debug!(id = self.core.id().0, count, "hello world, from bounce entity");

        if self.core.should_run() {
            if let Some(peers) = self.core.peers() {
                record.dest = peers.uniform(ctx.stream);
            }
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
