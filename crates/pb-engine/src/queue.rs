//! `EventQueue` — the globally ordered pending-event set.
//!
//! `BTreeMap<EventTime, VecDeque<EventRecord>>` gives O(log T) insert and
//! pop-earliest where T is the number of distinct pending times.  Records at
//! the same (tick, epsilon) dispatch in submission order — an arbitrary but
//! deterministic tie-break, which is all the time model promises for equal
//! timestamps.

use std::collections::{BTreeMap, VecDeque};

use pb_core::EventTime;
use pb_event::EventRecord;

#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<EventTime, VecDeque<EventRecord>>,
    len: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a record at its event time.
    pub fn push(&mut self, record: EventRecord) {
        self.inner.entry(record.time).or_default().push_back(record);
        self.len += 1;
    }

    /// Remove and return the globally earliest record.
    pub fn pop(&mut self) -> Option<EventRecord> {
        let mut entry = self.inner.first_entry()?;
        let record = entry
            .get_mut()
            .pop_front()
            .unwrap_or_else(|| unreachable!("queue never stores an empty bucket"));
        if entry.get().is_empty() {
            entry.remove();
        }
        self.len -= 1;
        Some(record)
    }

    /// The earliest pending event time, if any.
    pub fn next_time(&self) -> Option<EventTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
