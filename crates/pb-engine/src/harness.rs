//! Run-shape helpers: wall-clock-bounded runs and handled-count-targeted
//! runs.
//!
//! Both shapes end the same way the entities do everything else — lazily.
//! Stop flags suppress future submissions; records already in flight drain
//! through their handlers (and are absorbed by the circulating variants)
//! until the queue empties.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use pb_core::EntityId;
use tracing::info;

use crate::engine::{Engine, RunStats};
use crate::error::EngineResult;
use crate::observer::EngineObserver;

/// Run until roughly `duration` of wall clock has elapsed, then stop every
/// entity and drain.
///
/// The timer lives on a controller thread holding clones of the stop
/// handles; the engine itself never looks at a clock, so the dispatch
/// sequence up to the stop point is still fully deterministic.
pub fn run_timed(
    engine: &mut Engine,
    duration: Duration,
    observer: &mut dyn EngineObserver,
) -> EngineResult<RunStats> {
    let handles = engine.stop_handles();
    let (cancel, timer) = mpsc::channel::<()>();
    let controller = thread::spawn(move || {
        if let Err(RecvTimeoutError::Timeout) = timer.recv_timeout(duration) {
            for handle in &handles {
                handle.stop();
            }
        }
    });

    let stats = engine.run(observer);
    // Wake the controller if the queue drained before the timer fired.
    drop(cancel);
    let _ = controller.join();

    if let Ok(stats) = &stats {
        info!(dispatched = stats.dispatched, "timed run complete");
    }
    stats
}

/// Run until every entity has handled `per_entity` events, then drain.
///
/// An entity's flag is flipped one event early so the record already in
/// flight lands as the final handled event.  Exact for the variants that
/// keep one record circulating per entity (simple, alloc at one initial
/// event, memory, sha, phold at one initial event); with a larger in-flight
/// population the final count overshoots by the extra absorbed records,
/// same as any benchmark stopped mid-circulation.
pub fn run_until_handled(
    engine: &mut Engine,
    per_entity: u64,
    observer: &mut dyn EngineObserver,
) -> EngineResult<RunStats> {
    let threshold = per_entity.saturating_sub(1);
    let count = engine.entity_count();
    let stats = engine.run_until(observer, |eng| {
        for n in 0..count {
            let id = EntityId(n as u32);
            if eng.entity_handled(id) >= threshold {
                eng.stop_entity(id);
            }
        }
        false
    })?;
    info!(dispatched = stats.dispatched, per_entity, "targeted run complete");
    Ok(stats)
}
