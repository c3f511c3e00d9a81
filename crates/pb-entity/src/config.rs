//! The configuration bundle recognized by every benchmark variant.

use std::fmt;
use std::str::FromStr;

use pb_core::{BenchError, BenchResult, TimePolicy};

// ── VariantKind ───────────────────────────────────────────────────────────────

/// The closed set of workload variants, selected by a configuration tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariantKind {
    /// Counter increment only, single reused record slot, self-routed.
    Simple,
    /// Counter increment only, fresh record per submission — the
    /// allocate/free baseline.
    Alloc,
    /// Random block moves inside a private byte buffer, single-slot.
    Memory,
    /// SHA-3 digest of the entity's own name, single-slot.
    Sha,
    /// Classic parameterizable-locality hold pattern; records reroute
    /// themselves by value.
    Phold,
    /// One self event plus K fan-out probes per cycle, epoch-pooled.
    Mix,
    /// Conserved token population circulating through the entity graph.
    Bounce,
}

impl FromStr for VariantKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "alloc" => Ok(Self::Alloc),
            "memory" => Ok(Self::Memory),
            "sha" => Ok(Self::Sha),
            "phold" => Ok(Self::Phold),
            "mix" => Ok(Self::Mix),
            "bounce" => Ok(Self::Bounce),
            other => Err(BenchError::UnknownVariant(other.to_owned())),
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Simple => "simple",
            Self::Alloc => "alloc",
            Self::Memory => "memory",
            Self::Sha => "sha",
            Self::Phold => "phold",
            Self::Mix => "mix",
            Self::Bounce => "bounce",
        };
        f.write_str(s)
    }
}

// ── EntityConfig ──────────────────────────────────────────────────────────────

/// Everything an entity constructor recognizes.  One bundle configures every
/// entity in a run; fields a variant does not use are ignored by it but
/// still range-checked.
///
/// All validation happens in [`validate`][Self::validate] before any entity
/// is built — index and range errors are impossible at dispatch time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityConfig {
    pub variant: VariantKind,

    /// Minimum tick advance for every generated event time.  Must be >= 1.
    pub look_ahead: u64,
    /// Spread first-wave ticks by `id % modulus`.
    pub stagger_tick: bool,
    /// Rotate the same-tick tie-break by `(id + count) % modulus`.
    pub stagger_epsilon: bool,

    /// Probability that a follow-up targets a peer rather than self.
    /// Only the transient-record variants (`alloc`, `phold`) accept a
    /// nonzero value; the single-slot variants are local-only by contract.
    pub remote_probability: f64,

    /// In-flight records seeded per entity (`alloc`, `phold`).
    pub initial_events: u64,

    /// Private buffer size for the memory variant.
    pub buffer_bytes: usize,
    /// Contiguous block moved per cycle; must fit inside the buffer.
    pub block_bytes: usize,

    /// Digest width for the hash variant: 256 or 512.
    pub digest_bits: u32,

    /// Probes per cycle for the mix variant (K).
    pub fanout: usize,
    /// Epoch-pool depth for the mix variant's probe slots.  Depth 2 is the
    /// classic double buffer; raise it if engine delivery latency can exceed
    /// one cycle.
    pub epoch_depth: usize,

    /// Token population size for the bounce variant.
    pub tokens: u32,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            variant: VariantKind::Simple,
            look_ahead: 1,
            stagger_tick: false,
            stagger_epsilon: false,
            remote_probability: 0.0,
            initial_events: 1,
            buffer_bytes: 1 << 20,
            block_bytes: 4096,
            digest_bits: 256,
            fanout: 4,
            epoch_depth: 2,
            tokens: 16,
        }
    }
}

impl EntityConfig {
    /// A default bundle for the given variant.
    pub fn for_variant(variant: VariantKind) -> Self {
        Self { variant, ..Self::default() }
    }

    /// Build the time policy this bundle describes.
    pub fn time_policy(&self) -> BenchResult<TimePolicy> {
        Ok(TimePolicy::new(self.look_ahead)?
            .with_stagger_tick(self.stagger_tick)
            .with_stagger_epsilon(self.stagger_epsilon))
    }

    /// Reject every out-of-range combination up front.
    pub fn validate(&self) -> BenchResult<()> {
        if self.look_ahead == 0 {
            return Err(BenchError::Config("look-ahead must be at least 1 tick".into()));
        }
        if !self.remote_probability.is_finite()
            || !(0.0..=1.0).contains(&self.remote_probability)
        {
            return Err(BenchError::Config(format!(
                "remote probability {} outside [0, 1]",
                self.remote_probability
            )));
        }

        match self.variant {
            VariantKind::Simple | VariantKind::Sha | VariantKind::Memory | VariantKind::Mix => {
                // Single-slot reuse is only safe when the follow-up chain
                // stays on the owning entity.
                if self.remote_probability != 0.0 {
                    return Err(BenchError::Config(format!(
                        "variant {} reuses a single record slot and is local-only; \
                         remote probability must be 0",
                        self.variant
                    )));
                }
            }
            VariantKind::Alloc | VariantKind::Phold => {
                if self.initial_events == 0 {
                    return Err(BenchError::Config(
                        "initial events must be at least 1".into(),
                    ));
                }
            }
            VariantKind::Bounce => {}
        }

        match self.variant {
            VariantKind::Memory => {
                if self.buffer_bytes == 0 || self.block_bytes == 0 {
                    return Err(BenchError::Config(
                        "memory buffer and block sizes must be nonzero".into(),
                    ));
                }
                if self.block_bytes > self.buffer_bytes {
                    return Err(BenchError::Config(format!(
                        "move block of {} bytes exceeds buffer of {} bytes",
                        self.block_bytes, self.buffer_bytes
                    )));
                }
            }
            VariantKind::Sha => {
                if self.digest_bits != 256 && self.digest_bits != 512 {
                    return Err(BenchError::Config(format!(
                        "unsupported digest width {}; expected 256 or 512",
                        self.digest_bits
                    )));
                }
            }
            VariantKind::Mix => {
                if self.fanout == 0 {
                    return Err(BenchError::Config("fan-out must be at least 1".into()));
                }
                if self.epoch_depth < 2 {
                    return Err(BenchError::Config(format!(
                        "epoch depth must be at least 2, got {}",
                        self.epoch_depth
                    )));
                }
            }
            VariantKind::Bounce => {
                if self.tokens == 0 {
                    return Err(BenchError::Config(
                        "token population must be at least 1".into(),
                    ));
                }
            }
            _ => {}
        }

        Ok(())
    }
}
