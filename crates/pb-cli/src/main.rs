//! `pdes-bench` — run one benchmark workload and print a JSON summary.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use pb_entity::{EntityConfig, VariantKind};
use pb_engine::{EngineBuilder, NoopObserver, RunStats, run_timed, run_until_handled};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pdes-bench",
    version,
    about = "Synthetic workload suite for discrete-event simulation engines"
)]
struct Cli {
    /// Number of benchmark entities.
    #[arg(short = 'm', long, default_value_t = 1)]
    entities: usize,
    /// Workload variant: simple, alloc, memory, sha, phold, mix, bounce.
    #[arg(short = 'n', long, default_value = "simple")]
    variant: String,
    /// Target handled events per entity.
    #[arg(short = 'e', long, default_value_t = 100, conflicts_with = "seconds")]
    events: u64,
    /// Run for a wall-clock duration instead of an event target.
    #[arg(long)]
    seconds: Option<f64>,
    /// Minimum tick advance for every generated event time.
    #[arg(short = 'l', long, default_value_t = 1)]
    look_ahead: u64,
    /// Spread first-wave ticks by entity id.
    #[arg(long)]
    stagger_tick: bool,
    /// Rotate the same-tick tie-break per entity and handled count.
    #[arg(short = 's', long)]
    stagger_epsilon: bool,
    /// Probability a follow-up routes to a peer (alloc, phold).
    #[arg(short = 'p', long, default_value_t = 0.0)]
    remote_probability: f64,
    /// In-flight records seeded per entity (alloc, phold).
    #[arg(long, default_value_t = 1)]
    initial_events: u64,
    /// Private buffer size in bytes (memory).
    #[arg(long, default_value_t = 1 << 20)]
    buffer_bytes: usize,
    /// Moved block size in bytes (memory).
    #[arg(long, default_value_t = 4096)]
    block_bytes: usize,
    /// Digest width in bits, 256 or 512 (sha).
    #[arg(long, default_value_t = 256)]
    digest_bits: u32,
    /// Probes per cycle (mix).
    #[arg(long, default_value_t = 4)]
    fanout: usize,
    /// Probe pool epoch depth (mix).
    #[arg(long, default_value_t = 2)]
    epoch_depth: usize,
    /// Token population size (bounce).
    #[arg(long, default_value_t = 16)]
    tokens: u32,
    /// Shared stream seed for deterministic results.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Log per-event handler chatter (RUST_LOG overrides).
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Result<EntityConfig> {
        let variant: VariantKind = self.variant.parse()?;
        let mut config = EntityConfig::for_variant(variant);
        config.look_ahead = self.look_ahead;
        config.stagger_tick = self.stagger_tick;
        config.stagger_epsilon = self.stagger_epsilon;
        config.remote_probability = self.remote_probability;
        config.initial_events = self.initial_events;
        config.buffer_bytes = self.buffer_bytes;
        config.block_bytes = self.block_bytes;
        config.digest_bits = self.digest_bits;
        config.fanout = self.fanout;
        config.epoch_depth = self.epoch_depth;
        config.tokens = self.tokens;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct Summary {
    variant: String,
    entities: usize,
    seed: u64,
    elapsed_s: f64,
    events_per_second: f64,
    stats: RunStats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config()?;
    info!(
        variant = %config.variant,
        entities = cli.entities,
        seed = cli.seed,
        "starting run"
    );

    let mut engine = EngineBuilder::new(config.clone())
        .entities(cli.entities)
        .seed(cli.seed)
        .build()
        .context("build engine")?;

    let start = Instant::now();
    let stats = match cli.seconds {
        Some(seconds) => {
            ensure!(
                seconds.is_finite() && seconds > 0.0,
                "run duration must be a positive number of seconds"
            );
            run_timed(&mut engine, Duration::from_secs_f64(seconds), &mut NoopObserver)?
        }
        None => run_until_handled(&mut engine, cli.events, &mut NoopObserver)?,
    };
    let elapsed_s = start.elapsed().as_secs_f64();

    let summary = Summary {
        variant: config.variant.to_string(),
        entities: cli.entities,
        seed: cli.seed,
        elapsed_s,
        events_per_second: if elapsed_s > 0.0 {
            stats.dispatched as f64 / elapsed_s
        } else {
            0.0
        },
        stats,
    };
    let rendered = serde_json::to_string_pretty(&summary).context("serialize summary")?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
