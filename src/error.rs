use std::io;

use thiserror::Error;

/// Errors surfaced while standing up a coordinator's background threads.
///
/// Everything after construction is fire-and-forget: queries and dataset
/// replacements never fail from the caller's point of view, and a matcher
/// that has gone away simply stops producing results.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The matcher or router thread could not be started.
    #[error("failed to spawn background search thread: {0}")]
    Thread(#[from] io::Error),
}
