//! Exact-match partial queries over document fields.

use crate::types::DocumentId;
use serde_json::{Map, Value};

/// An exact-match filter over record fields.
///
/// A record matches when every queried field is present and equal to the
/// queried value. Equality is `serde_json::Value` equality: no type coercion
/// and no partial or substring matching. The empty query matches every
/// record.
#[derive(Clone, Debug, Default)]
pub struct Query {
    fields: Map<String, Value>,
}

impl Query {
    /// The empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Query records by id.
    pub fn by_id(id: DocumentId) -> Self {
        Query::new().field("id", id.to_string())
    }

    /// Add an exact-match condition on `key`.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Whether `record` satisfies every condition in this query.
    ///
    /// A record that lacks a queried field never matches.
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        self.fields
            .iter()
            .all(|(key, expected)| record.get(key) == Some(expected))
    }

    /// True when no conditions have been added.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
