//! The search subsystem: coordinator, background matcher, and the message
//! protocol binding them.
//!
//! [`SearchCoordinator`] is the caller-facing half; it owns the
//! pending-request bookkeeping and talks to the matcher thread exclusively
//! through the channel protocol in `commands`. The matcher half lives in
//! `worker`/`engine` and holds the normalized dataset.

mod commands;
mod coordinator;
mod engine;
mod normalize;
mod record;
mod worker;

#[cfg(test)]
mod tests;

pub use coordinator::SearchCoordinator;
pub use normalize::normalize;
pub use record::{Record, RecordId};
