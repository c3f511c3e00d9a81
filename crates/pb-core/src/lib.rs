//! `pb-core` — foundational types for the `pdes_bench` workload suite.
//!
//! This crate is a dependency of every other `pb-*` crate.  It intentionally
//! has no `pb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `EntityId`, `TokenId`, `SlotId`                       |
//! | [`time`]  | `Tick`, `EventTime`, `TimePolicy`                     |
//! | [`rng`]   | `RandomStream` trait, `SharedStream`, `ScriptedStream`|
//! | [`error`] | `BenchError`, `BenchResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|--------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.    |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BenchError, BenchResult};
pub use ids::{EntityId, SlotId, TokenId};
pub use rng::{RandomStream, ScriptedStream, SharedStream};
pub use time::{EventTime, Tick, TimePolicy};
