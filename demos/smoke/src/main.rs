//! smoke — smallest end-to-end run of the pdes_bench suite.
//!
//! Runs every workload variant at toy scale (4 entities, 1 000 handled
//! events each) and prints one summary line per variant.  Useful as a
//! does-everything-still-work check; for real measurements use the
//! `pdes-bench` binary, which exposes all the knobs.

use std::time::Instant;

use anyhow::Result;

use pb_engine::{EngineBuilder, NoopObserver, run_until_handled};
use pb_entity::{EntityConfig, VariantKind};

const ENTITIES: usize = 4;
const EVENTS_PER_ENTITY: u64 = 1_000;
const SEED: u64 = 42;

fn main() -> Result<()> {
    let variants = [
        VariantKind::Simple,
        VariantKind::Alloc,
        VariantKind::Memory,
        VariantKind::Sha,
        VariantKind::Phold,
        VariantKind::Mix,
        VariantKind::Bounce,
    ];

    for variant in variants {
        let mut config = EntityConfig::for_variant(variant);
        if let VariantKind::Alloc | VariantKind::Phold = variant {
            config.remote_probability = 0.5;
        }

        let mut engine = EngineBuilder::new(config)
            .entities(ENTITIES)
            .seed(SEED)
            .build()?;

        let start = Instant::now();
        let stats = run_until_handled(&mut engine, EVENTS_PER_ENTITY, &mut NoopObserver)?;
        let elapsed = start.elapsed();

        let line = serde_json::json!({
            "variant": variant.to_string(),
            "dispatched": stats.dispatched,
            "elapsed_us": elapsed.as_micros() as u64,
            "staleness_violations": stats
                .entities
                .iter()
                .map(|e| e.staleness_violations)
                .sum::<u64>(),
        });
        println!("{line}");
    }

    Ok(())
}
