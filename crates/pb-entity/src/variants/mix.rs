//! Fan-out workload: one self event plus K probes to random peers per cycle.
//!
//! The self event drives the next cycle through a single reused slot; the K
//! probes are staged from an epoch pool so a probe slot is not rewritten
//! until `depth - 1` cycles after its submission, even though the receiving
//! handlers run asynchronously relative to this entity's cycle.  Probes are
//! counted by the receiver and never answered.
//!
//! Slot numbering in record provenance: slot 0 is the cycle slot, probe pool
//! slot `i` is published as `i + 1`.  `release_slot` undoes the shift.

use pb_core::{BenchResult, EntityId, SlotId};
use pb_event::{EventRecord, Payload, SlotPool};
use tracing::debug;

use crate::config::EntityConfig;
use crate::context::EngineContext;
use crate::core::EntityCore;
use crate::model::{BenchEntity, EntityStats};

const CYCLE_SLOT: SlotId = SlotId(0);

pub struct Mix {
    core: EntityCore,
    cycle_slot: SlotPool,
    probe_pool: SlotPool,
    fanout: usize,
    probes_seen: u64,
}

impl Mix {
    pub fn new(id: EntityId, name: String, cfg: &EntityConfig) -> BenchResult<Self> {
        Ok(Self {
            core: EntityCore::new(id, name, cfg)?,
            cycle_slot: SlotPool::single(),
            probe_pool: SlotPool::epochs(cfg.epoch_depth, cfg.fanout)?,
            fanout: cfg.fanout,
            probes_seen: 0,
        })
    }

    /// Stage one cycle: the self event plus K probes from the next epoch.
    fn emit_cycle(&mut self, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let me = self.core.id();
        let mut out = Vec::with_capacity(1 + self.fanout);

        self.cycle_slot.mark_submitted(CYCLE_SLOT);
        out.push(EventRecord::pooled(
            me,
            self.core.next_time(ctx.now),
            Payload::Cycle,
            me,
            CYCLE_SLOT,
        ));

        let base = self.probe_pool.begin_cycle();
        for k in 0..self.fanout {
            let pool_slot = SlotId(base + k as u32);
            self.probe_pool.mark_submitted(pool_slot);

            let dest = match self.core.peers() {
                Some(peers) => peers.uniform(ctx.stream),
                None => me,
            };
            out.push(EventRecord::pooled(
                dest,
                self.core.next_time(ctx.now),
                Payload::Probe,
                me,
                SlotId(pool_slot.0 + 1),
            ));
        }

        out
    }
}

impl BenchEntity for Mix {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        self.emit_cycle(ctx)
    }

    fn handle(&mut self, record: EventRecord, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        match record.payload {
            Payload::Cycle => {
                let count = self.core.bump();
                debug!(id = self.core.id().0, count, "hello world, from mix entity");

                if self.core.should_run() {
                    self.emit_cycle(ctx)
                } else {
                    Vec::new()
                }
            }
            Payload::Probe => {
                self.probes_seen += 1;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn release_slot(&mut self, slot: SlotId) {
        if slot == CYCLE_SLOT {
            self.cycle_slot.mark_delivered(CYCLE_SLOT);
        } else {
            self.probe_pool.mark_delivered(SlotId(slot.0 - 1));
        }
    }

    fn stats(&self) -> EntityStats {
        EntityStats {
            payload_ops: self.probes_seen,
            staleness_violations: self.cycle_slot.staleness_violations()
                + self.probe_pool.staleness_violations(),
            ..EntityStats::for_core(&self.core)
        }
    }
}
