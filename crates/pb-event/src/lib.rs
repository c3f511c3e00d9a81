//! `pb-event` — event records and event-lifetime bookkeeping.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`record`] | `EventRecord`, `Payload` tagged union, `Provenance`        |
//! | [`pool`]   | `SlotPool` — single-slot and epoch (double-buffered) reuse |
//! | [`token`]  | `TokenPool` — conserved circulating-token bookkeeping      |
//!
//! # Ownership model
//!
//! An [`record::EventRecord`] moves by value into the engine queue and back
//! out into the receiving handler — a single-owner handle, never a shared
//! pointer.  Storage-reuse strategies become *slot accounting*: a pooled
//! record carries `Provenance::Slot` naming the slot it
//! was staged from, the engine reports the slot consumed at dispatch, and
//! [`pool::SlotPool`] asserts that no slot is restaged while a previous
//! submission of it is still in flight.

pub mod pool;
pub mod record;
pub mod token;


pub use pool::SlotPool;
pub use record::{EventRecord, Payload, Provenance};
pub use token::TokenPool;
