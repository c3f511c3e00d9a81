//! `EntityCore` — the shared base state every benchmark variant embeds:
//! identity, handled-event counter, stop flag, peer registry, time
//! generation, and destination selection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pb_core::{BenchResult, EntityId, EventTime, RandomStream, TimePolicy};

use crate::config::EntityConfig;

// ── PeerRegistry ──────────────────────────────────────────────────────────────

/// The immutable, fully-populated list of all entities in the run.
///
/// Built once by the harness after every entity exists and shared by
/// reference; nothing is ever added or removed at runtime, so unsynchronized
/// concurrent reads are safe.  Used only for destination lookup by index.
#[derive(Debug)]
pub struct PeerRegistry {
    ids: Vec<EntityId>,
}

impl PeerRegistry {
    /// Registry over entities `0..count`.
    pub fn new(count: usize) -> Self {
        Self { ids: (0..count as u32).map(EntityId).collect() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> EntityId {
        self.ids[index]
    }

    /// A uniformly random entity — self included.  Panics on an empty
    /// registry, which construction-time validation rules out.
    #[inline]
    pub fn uniform(&self, stream: &mut dyn RandomStream) -> EntityId {
        self.ids[stream.next_index(self.ids.len())]
    }
}

// ── StopHandle ────────────────────────────────────────────────────────────────

/// A clonable handle that flips one entity's stop flag.
///
/// Safe to invoke from any thread at any time.  Stopping is cooperative and
/// lazy: already-queued events for the entity are still delivered; only
/// future submissions are suppressed.
#[derive(Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

// ── EntityCore ────────────────────────────────────────────────────────────────

/// Base state for every benchmark entity.
///
/// The handled-event counter is mutated only by the owning entity's handler
/// and needs no synchronization under the engine's per-entity-serialization
/// guarantee.  The stop flag is a single-writer settle-to-false signal with
/// no timing requirement on observation, hence the relaxed atomics.
pub struct EntityCore {
    id: EntityId,
    name: String,
    count: u64,
    run: Arc<AtomicBool>,
    policy: TimePolicy,
    remote_probability: f64,
    peers: Option<Arc<PeerRegistry>>,
}

impl EntityCore {
    pub fn new(id: EntityId, name: String, cfg: &EntityConfig) -> BenchResult<Self> {
        Ok(Self {
            id,
            name,
            count: 0,
            run: Arc::new(AtomicBool::new(true)),
            policy: cfg.time_policy()?,
            remote_probability: cfg.remote_probability,
            peers: None,
        })
    }

    // ── Identity & counters ───────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Events handled so far.
    #[inline]
    pub fn handled(&self) -> u64 {
        self.count
    }

    /// Increment the handled counter; returns the new value.
    #[inline]
    pub fn bump(&mut self) -> u64 {
        self.count += 1;
        self.count
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Wire in the peer registry.  Called exactly once, after every entity
    /// in the run exists and before the engine starts.
    pub fn set_peers(&mut self, peers: Arc<PeerRegistry>) {
        self.peers = Some(peers);
    }

    pub fn peers(&self) -> Option<&PeerRegistry> {
        self.peers.as_deref()
    }

    /// `true` until the stop flag is flipped.
    #[inline]
    pub fn should_run(&self) -> bool {
        self.run.load(Ordering::Relaxed)
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle { flag: Arc::clone(&self.run) }
    }

    pub fn stop(&self) {
        self.run.store(false, Ordering::Relaxed);
    }

    // ── Time generation ───────────────────────────────────────────────────

    /// Next event time for this entity executing at `now`, per the
    /// configured look-ahead/stagger policy and the current handled count.
    #[inline]
    pub fn next_time(&self, now: EventTime) -> EventTime {
        self.policy.next_time(now, self.id, self.count)
    }

    #[inline]
    pub fn policy(&self) -> &TimePolicy {
        &self.policy
    }

    // ── Destination selection ─────────────────────────────────────────────

    /// The locality-control knob: with probability `remote_probability` a
    /// uniformly chosen peer *other than self*, otherwise self.
    ///
    /// A registry of size 0 or 1 degenerates to self regardless of the
    /// probability, so the index arithmetic below can never go out of range.
    /// The remote index is drawn over `len - 1` and shifted past self, so a
    /// probability of exactly 1 with more than one entity never self-routes.
    pub fn next_dest(&self, stream: &mut dyn RandomStream) -> EntityId {
        let Some(peers) = self.peers.as_deref() else {
            return self.id;
        };
        let n = peers.len();
        if n <= 1 || !stream.next_bool(self.remote_probability) {
            return self.id;
        }
        let mut index = stream.next_index(n - 1);
        if index >= self.id.index() {
            index += 1;
        }
        peers.get(index)
    }
}
