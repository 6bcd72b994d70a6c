//! Per-family snapshot cache.

use medley_client::{ClientError, ClientResult};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// What a read returns: the last-known snapshot plus fetch state.
///
/// Empty data with `is_fetching` set is the pending state of a first
/// access; data together with an error is a stale snapshot whose most
/// recent refresh failed.
#[derive(Debug)]
pub struct Snapshot<T> {
    /// Last successfully fetched value, if any.
    pub data: Option<Arc<T>>,
    /// Error from the most recent fetch, if it failed.
    pub error: Option<ClientError>,
    /// True while a fetch is in flight.
    pub is_fetching: bool,
    /// When `data` was fetched.
    pub fetched_at: Option<Instant>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.is_fetching,
            fetched_at: self.fetched_at,
        }
    }
}

impl<T> Snapshot<T> {
    /// True when nothing has ever been fetched.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

struct SlotState<T> {
    data: Option<Arc<T>>,
    error: Option<ClientError>,
    fetched_at: Option<Instant>,
    /// Bumped by invalidation; a snapshot fetched under an older
    /// generation is stale regardless of cadence.
    generation: u64,
    /// Generation the current snapshot was fetched under.
    fetched_generation: u64,
    fetching: bool,
}

/// Cache entry for one resource family.
///
/// Values are replaced wholesale on every successful fetch. The slot
/// enforces single-flight: `begin_fetch` hands out at most one token at
/// a time, and the token carries the generation observed at claim time,
/// so a fetch that raced an invalidation leaves the entry stale and the
/// next read fetches again.
pub(crate) struct CacheSlot<T> {
    state: RwLock<SlotState<T>>,
}

impl<T> CacheSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(SlotState {
                data: None,
                error: None,
                fetched_at: None,
                generation: 0,
                fetched_generation: 0,
                fetching: false,
            }),
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        let s = self.state.read();
        Snapshot {
            data: s.data.clone(),
            error: s.error.clone(),
            is_fetching: s.fetching,
            fetched_at: s.fetched_at,
        }
    }

    /// Marks the entry so the next read fetches fresh data. Never
    /// refetches synchronously.
    pub(crate) fn invalidate(&self) {
        self.state.write().generation += 1;
    }

    /// Claims the single fetch slot if the entry needs refreshing.
    /// Returns the generation token to pass back to `complete`.
    pub(crate) fn begin_fetch(&self, cadence: Option<Duration>) -> Option<u64> {
        let mut s = self.state.write();
        if s.fetching || !s.needs_fetch(cadence) {
            return None;
        }
        s.fetching = true;
        Some(s.generation)
    }

    /// Stores a fetch outcome. A failure keeps the previous snapshot and
    /// records the error alongside it.
    pub(crate) fn complete(&self, token: u64, result: ClientResult<T>) {
        let mut s = self.state.write();
        s.fetching = false;
        match result {
            Ok(value) => {
                s.data = Some(Arc::new(value));
                s.error = None;
                s.fetched_at = Some(Instant::now());
                s.fetched_generation = token;
            }
            Err(err) => {
                s.error = Some(err);
            }
        }
    }
}

impl<T> SlotState<T> {
    fn needs_fetch(&self, cadence: Option<Duration>) -> bool {
        if self.fetched_generation < self.generation {
            return true;
        }
        match self.fetched_at {
            // Nothing fetched successfully yet.
            None => true,
            Some(at) => cadence.is_some_and(|c| at.elapsed() >= c),
        }
    }
}
