use log::debug;

use super::normalize::normalize;
use super::record::{Record, RecordId};

/// Holds the normalized dataset and executes substring scans.
///
/// The engine is stateless across queries apart from the stored records.
/// Fields are normalized once when the dataset is replaced, so each scan is
/// a plain substring test against pre-folded text.
#[derive(Default)]
pub(crate) struct SearchEngine {
    records: Vec<NormalizedRecord>,
}

/// A record as the engine stores it: the caller's id plus owned, normalized
/// copies of the fields. The caller's own data is never touched.
struct NormalizedRecord {
    id: RecordId,
    fields: Vec<String>,
}

impl SearchEngine {
    /// Replace the dataset wholesale. No merging: whatever was stored before
    /// is dropped.
    pub(crate) fn replace_dataset(&mut self, records: Vec<Record>) {
        self.records = records
            .into_iter()
            .map(|record| NormalizedRecord {
                id: record.id,
                fields: record.fields.iter().map(|field| normalize(field)).collect(),
            })
            .collect();
        debug!("dataset replaced: {} records", self.records.len());
    }

    /// Scan records in dataset order, returning the ids of records with at
    /// least one field containing the normalized query as a contiguous
    /// substring. Runs to completion; an empty dataset yields an empty
    /// result.
    pub(crate) fn search(&self, text: &str) -> Vec<RecordId> {
        let needle = normalize(text);
        self.records
            .iter()
            .filter(|record| record.fields.iter().any(|field| field.contains(&needle)))
            .map(|record| record.id.clone())
            .collect()
    }
}
