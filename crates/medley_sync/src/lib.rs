//! # Medley Synchronization Layer
//!
//! Keeps cached views of the media-indexing backend coherent.
//!
//! This crate provides:
//! - A keyed snapshot cache, one entry per [`ResourceFamily`]
//! - Per-family polling cadence ([`PollPolicy`])
//! - Generation-counter invalidation driven by a fixed mutation table
//! - Watch guards that start and stop background polling
//! - A [`Notifier`] side channel for mutation outcomes
//!
//! ## Architecture
//!
//! Reads return the last cached snapshot immediately and refresh in the
//! background once the family's cadence has elapsed or the family has
//! been invalidated. Mutations call the backend, and on success bump the
//! generation counters of exactly the families the fixed table declares;
//! the next read of an invalidated family fetches fresh data. There is
//! never a synchronous refetch after a write.
//!
//! ## Key Invariants
//!
//! - The backend is the source of truth; the cache holds replaceable
//!   derived data only
//! - Snapshots are replaced wholesale, never merged
//! - A failed refresh never clears cached data; the error rides along
//! - At most one fetch is in flight per family
//! - Mutation errors surface through the notifier, never as `Err`

mod cache;
mod engine;
mod family;
mod libraries;
mod mutation;
mod notify;

pub use cache::Snapshot;
pub use engine::{SyncEngine, WatchGuard};
pub use family::{PollPolicy, ResourceFamily};
pub use libraries::Libraries;
pub use mutation::{MutationKind, MutationOutcome};
pub use notify::{LogNotifier, MemoryNotifier, Notification, Notifier};

pub use medley_client::{ClientError, ClientResult};
