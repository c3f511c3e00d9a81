//! `pb-entity` — benchmark entity behaviors.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`core`]     | `EntityCore` (identity, counter, stop flag, peers, selector), `PeerRegistry`, `StopHandle` |
//! | [`context`]  | `EngineContext<'a>` — what the engine lends a handler     |
//! | [`model`]    | `BenchEntity` trait, `EntityStats`                        |
//! | [`config`]   | `EntityConfig`, `VariantKind`, validation                 |
//! | [`variants`] | The seven workload implementations + `build_entity` factory |
//!
//! # Design notes
//!
//! Entities never call each other.  A handler receives one
//! [`EventRecord`](pb_event::EventRecord) by value plus an
//! [`EngineContext`] (current time, shared random stream) and returns the
//! records it wants submitted — the engine owns the queue, the clock, and
//! the stream.  That split keeps every handler synchronous, bounded, and
//! free of engine internals.

pub mod config;
pub mod context;
pub mod core;
pub mod model;
pub mod variants;

#[cfg(test)]
mod tests;

pub use config::{EntityConfig, VariantKind};
pub use context::EngineContext;
pub use core::{EntityCore, PeerRegistry, StopHandle};
pub use model::{BenchEntity, EntityStats};
pub use variants::build_entity;
