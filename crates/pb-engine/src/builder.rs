//! `EngineBuilder` — entity construction, peer wiring, and first-wave
//! seeding in one place.

use std::sync::Arc;

use pb_core::{EntityId, RandomStream, SharedStream};
use pb_entity::{BenchEntity, EntityConfig, PeerRegistry, build_entity};
use tracing::debug;

use crate::engine::Engine;
use crate::error::EngineResult;

/// Default stream seed when the caller specifies none.
const DEFAULT_SEED: u64 = 0x5eed_cafe;

/// Builds a ready-to-run [`Engine`]: validates the configuration, constructs
/// one entity per id, wires the shared peer registry, and enqueues every
/// entity's first wave.
pub struct EngineBuilder {
    config: EntityConfig,
    entities: usize,
    seed: u64,
    stream: Option<Box<dyn RandomStream>>,
}

impl EngineBuilder {
    pub fn new(config: EntityConfig) -> Self {
        Self { config, entities: 1, seed: DEFAULT_SEED, stream: None }
    }

    /// Number of entities in the run.
    pub fn entities(mut self, n: usize) -> Self {
        self.entities = n;
        self
    }

    /// Seed for the engine-owned shared stream.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Inject a stream directly, overriding the seed.  Tests use this to
    /// drive the engine from a [`ScriptedStream`](pb_core::ScriptedStream).
    pub fn stream(mut self, stream: Box<dyn RandomStream>) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate()?;

        let peers = Arc::new(PeerRegistry::new(self.entities));
        let mut entities: Vec<Box<dyn BenchEntity>> = Vec::with_capacity(self.entities);
        for n in 0..self.entities {
            let id = EntityId(n as u32);
            let name = format!("Entity_{}", n);
            let mut entity = build_entity(id, name, &self.config)?;
            entity.core_mut().set_peers(Arc::clone(&peers));
            entities.push(entity);
        }
        debug!(
            variant = %self.config.variant,
            entities = self.entities,
            seed = self.seed,
            "engine built"
        );

        let stream = self
            .stream
            .unwrap_or_else(|| Box::new(SharedStream::new(self.seed)));
        let mut engine = Engine::new(entities, stream, self.config.look_ahead);
        engine.seed()?;
        Ok(engine)
    }
}
