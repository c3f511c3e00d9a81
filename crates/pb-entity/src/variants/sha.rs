//! Compute-bound workload: a SHA-3 digest of the entity's own name per cycle.
//!
//! Deterministic, allocation-light cost — the input never changes and the
//! digest lands in a fixed buffer.

use pb_core::{BenchResult, EntityId, SlotId};
use pb_event::{EventRecord, Payload, SlotPool};
use sha3::{Digest, Sha3_256, Sha3_512};
use tracing::debug;

use crate::config::EntityConfig;
use crate::context::EngineContext;
use crate::core::EntityCore;
use crate::model::{BenchEntity, EntityStats};

const SLOT: SlotId = SlotId(0);

/// Large enough for the widest supported digest.
const MAX_DIGEST_BYTES: usize = 64;

pub struct ShaDigest {
    core: EntityCore,
    slot: SlotPool,
    bits: u32,
    digest: [u8; MAX_DIGEST_BYTES],
    digests: u64,
}

impl ShaDigest {
    pub fn new(id: EntityId, name: String, cfg: &EntityConfig) -> BenchResult<Self> {
        Ok(Self {
            core: EntityCore::new(id, name, cfg)?,
            slot: SlotPool::single(),
            bits: cfg.digest_bits,
            digest: [0u8; MAX_DIGEST_BYTES],
            digests: 0,
        })
    }

    fn stage(&mut self, ctx: &EngineContext<'_>) -> EventRecord {
        let time = self.core.next_time(ctx.now);
        self.slot.mark_submitted(SLOT);
        EventRecord::pooled(self.core.id(), time, Payload::Empty, self.core.id(), SLOT)
    }
}

impl BenchEntity for ShaDigest {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        vec![self.stage(ctx)]
    }

    fn handle(&mut self, _record: EventRecord, ctx: &mut EngineContext<'_>) -> Vec<EventRecord> {
        let count = self.core.bump();
        debug!(id = self.core.id().0, count, "hello world, from sha entity");

        let input = self.core.name().as_bytes();
        match self.bits {
            256 => self.digest[..32].copy_from_slice(&Sha3_256::digest(input)),
            512 => self.digest[..64].copy_from_slice(&Sha3_512::digest(input)),
            // Unreachable: construction-time validation only admits 256/512.
            other => unreachable!("unsupported digest width {other}"),
        }
        self.digests += 1;

        if self.core.should_run() {
            vec![self.stage(ctx)]
        } else {
            Vec::new()
        }
    }

    fn release_slot(&mut self, slot: SlotId) {
        self.slot.mark_delivered(slot);
    }

    fn stats(&self) -> EntityStats {
        EntityStats {
            payload_ops: self.digests,
            staleness_violations: self.slot.staleness_violations(),
            ..EntityStats::for_core(&self.core)
        }
    }
}
