//! Engine observer trait for progress reporting and trace capture.

use pb_core::{EntityId, EventTime};

/// Callbacks invoked by the dispatch loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait EngineObserver {
    /// A record is about to be dispatched to `entity` at `time`.
    fn on_dispatch(&mut self, _entity: EntityId, _time: EventTime) {}

    /// A handler on `origin` submitted a follow-up record for `dest`.
    /// First-wave seeding does not pass through this hook.
    fn on_submit(&mut self, _origin: EntityId, _dest: EntityId, _time: EventTime) {}

    /// The run ended (queue drained or dispatch budget reached).
    fn on_run_end(&mut self, _dispatched: u64) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

/// Records the full (entity, tick, epsilon) dispatch sequence.
///
/// Two runs with the same seed and entity count must produce identical
/// traces; tests compare them directly.
#[derive(Default)]
pub struct TraceObserver {
    pub trace: Vec<(EntityId, EventTime)>,
}

impl TraceObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EngineObserver for TraceObserver {
    fn on_dispatch(&mut self, entity: EntityId, time: EventTime) {
        self.trace.push((entity, time));
    }
}
