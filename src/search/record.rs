use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier attached to a [`Record`].
///
/// Identifiers are returned verbatim in search results and never inspected
/// by the matcher. The untagged serde form is a bare integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Integer(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(id) => id.fmt(f),
            Self::Text(id) => id.fmt(f),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Integer(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// A searchable record: an opaque id plus the text fields the matcher scans.
///
/// Records are handed to the matcher wholesale via
/// [`SearchCoordinator::initialize`](super::SearchCoordinator::initialize);
/// the matcher keeps its own normalized copy, so the caller's fields are
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: Vec<String>,
}

impl Record {
    pub fn new<I>(id: impl Into<RecordId>, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            id: id.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}
