use pb_core::{BenchError, EntityId, EventTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] BenchError),

    /// A handler scheduled an event at or before its own execution time, or
    /// inside the engine's look-ahead window.  Always a programming defect
    /// in the generating entity; never recoverable.
    #[error(
        "causality violation: entity {entity} executing at {now} scheduled {scheduled} \
         (look-ahead {look_ahead})"
    )]
    Causality {
        entity: EntityId,
        now: EventTime,
        scheduled: EventTime,
        look_ahead: u64,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
