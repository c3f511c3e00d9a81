//! What the engine lends a handler for the duration of one invocation.

use pb_core::{EventTime, RandomStream};

/// Per-invocation view of the engine, passed to `initialize` and `handle`.
///
/// `now` is the event time currently being dispatched; every time a handler
/// generates must be strictly after it.  `stream` is the engine-owned shared
/// random stream — draws consume it in dispatch order, which is what makes
/// runs reproducible for a fixed seed.
pub struct EngineContext<'a> {
    pub now: EventTime,
    pub stream: &'a mut dyn RandomStream,
}

impl<'a> EngineContext<'a> {
    #[inline]
    pub fn new(now: EventTime, stream: &'a mut dyn RandomStream) -> Self {
        Self { now, stream }
    }
}
