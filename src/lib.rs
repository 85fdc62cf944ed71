//! Off-thread substring search with request coalescing.
//!
//! `subscan` registers a set of [`Record`]s and answers free-text queries
//! from a background matcher thread, so the calling thread never blocks on
//! a scan. Rapid query bursts collapse to at most the in-flight query plus
//! the newest follow-up, which keeps keystroke-driven search boxes from
//! ever rendering a stale intermediate result.
//!
//! Matching is exact substring containment after normalization (lowercasing
//! plus a fixed accent-folding table); there is no scoring, tokenization,
//! or index. Results arrive asynchronously through the callback handed to
//! [`SearchCoordinator::new`], as ordered sequences of [`RecordId`]s in
//! dataset order.

pub mod error;
pub mod search;

pub use error::SpawnError;
pub use search::{Record, RecordId, SearchCoordinator, normalize};
