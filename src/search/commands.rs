use super::record::{Record, RecordId};

/// Commands understood by the background matcher thread.
#[derive(Debug)]
pub(crate) enum SearchCommand {
    /// Replace the matcher's dataset wholesale.
    Initialize {
        /// Records in the order results should be reported in.
        records: Vec<Record>,
    },
    /// Scan the current dataset for the provided free-text query.
    Query {
        /// Query string as typed; the matcher normalizes it before scanning.
        text: String,
    },
    /// Stop the background matcher thread.
    Shutdown,
}

/// Matching identifiers emitted back to the coordinator.
#[derive(Debug)]
pub(crate) struct SearchResults {
    /// Ids of matching records, in dataset order.
    pub(crate) ids: Vec<RecordId>,
}
