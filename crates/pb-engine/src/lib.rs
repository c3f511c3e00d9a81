//! `pb-engine` — deterministic sequential reference engine for the
//! benchmark entities.
//!
//! The suite's contract with its engine is small: a current simulated time,
//! an event-submission sink with a causality check, and a shared random
//! stream.  A production PDES engine supplies those across a worker pool;
//! this crate supplies them from a single thread so that runs and tests are
//! exactly reproducible — the dispatch sequence for a fixed seed and entity
//! count is the reference trace any parallel engine must match.
//!
//! # Dispatch loop
//!
//! ```text
//! while let Some(record) = queue.pop_earliest():
//!   ① Advance  — now = record.time
//!   ② Release  — pooled provenance is reported consumed at its origin
//!   ③ Dispatch — receiving entity's handler runs synchronously
//!   ④ Submit   — returned records are causality-checked and enqueued
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`queue`]    | `EventQueue` — (tick, epsilon)-ordered, FIFO ties   |
//! | [`engine`]   | `Engine`, `RunStats`                                |
//! | [`builder`]  | `EngineBuilder` — entity creation and peer wiring   |
//! | [`observer`] | `EngineObserver`, `NoopObserver`, `TraceObserver`   |
//! | [`harness`]  | timed shutdown, handled-count-targeted runs         |
//! | [`error`]    | `EngineError`, `EngineResult`                       |

pub mod builder;
pub mod engine;
pub mod error;
pub mod harness;
pub mod observer;
pub mod queue;


pub use builder::EngineBuilder;
pub use engine::{Engine, RunStats};
pub use error::{EngineError, EngineResult};
pub use harness::{run_timed, run_until_handled};
pub use observer::{EngineObserver, NoopObserver, TraceObserver};
pub use queue::EventQueue;
