//! Memory-bandwidth-bound workload: random block moves in a private buffer.
//!
//! Each cycle copies a fixed-size contiguous block from one random offset to
//! another inside the entity's buffer (overlap-safe, like `memmove`), giving
//! data-dependent cache behavior.  The record carries the previous cycle's
//! destination offset; reading it back before the next move makes each
//! cycle's load depend on the last cycle's store.

use pb_core::{BenchResult, EntityId, SlotId};
use pb_event::{EventRecord, Payload, SlotPool};
use tracing::debug;

use crate::config::EntityConfig;
use crate::context::EngineContext;
use crate::core::EntityCore;
use crate::model::{BenchEntity, EntityStats};

const SLOT: SlotId = SlotId(0);

/// Page stride used when touching the buffer at initialization, so the run
/// does not start against untouched zero pages.
const TOUCH_STRIDE: usize = 4096;

pub struct MemoryMove {
    core: EntityCore,
    slot: SlotPool,
    buffer: Vec<u8>,
    block: usize,
    /// Running sum of bytes read back; keeps the loads observable.
    sum: u64,
    moves: u64,
}

impl MemoryMove {
    pub fn new(id: EntityId, name: String, cfg: &EntityConfig) -> BenchResult<Self> {
        Ok(Self {
            core: EntityCore::new(id, name, cfg)?,
            slot: SlotPool::single(),
            buffer: vec![0u8; cfg.buffer_bytes],
            block: cfg.block_bytes,
            sum: 0,
            moves: 0,
        })
    }

    fn stage(&mut self, ctx: &EngineContext<'_>, offset: u64) -> EventRecord {
        let time = self.core.next_time(ctx.now);
        self.slot.mark_submitted(SLOT);
        EventRecord::pooled(
            self.core.id(),
            time,
            Payload::Block { offset },
            self.core.id(),
            SLOT,
        )
    }
}

impl BenchEntity for MemoryMove {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let len = self.buffer.len();
        for byte in (0..len).step_by(TOUCH_STRIDE) {
            self.buffer[byte] = ctx.stream.next_u64() as u8;
        }
        self.buffer[len - 1] = ctx.stream.next_u64() as u8;

        let offset = ctx.stream.next_index(len) as u64;
        vec![self.stage(ctx, offset)]
    }

    fn handle(&mut self, record: EventRecord, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let count = self.core.bump();
        debug!(id = self.core.id().0, count, "hello world, from memory entity");

        if let Payload::Block { offset } = record.payload {
            self.sum = self.sum.wrapping_add(self.buffer[offset as usize] as u64);
        }

        // Random source to random destination; ranges chosen so the block
        // always fits.
        let span = self.buffer.len() - self.block + 1;
        let src = ctx.stream.next_index(span);
        let dst = ctx.stream.next_index(span);
        self.buffer.copy_within(src..src + self.block, dst);
        self.moves += 1;

        if self.core.should_run() {
            vec![self.stage(ctx, dst as u64)]
        } else {
            Vec::new()
        }
    }

    fn release_slot(&mut self, slot: SlotId) {
        self.slot.mark_delivered(slot);
    }

    fn stats(&self) -> EntityStats {
        EntityStats {
            payload_ops: self.moves,
            staleness_violations: self.slot.staleness_violations(),
            ..EntityStats::for_core(&self.core)
        }
    }
}
