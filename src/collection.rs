//! Typed per-collection handles.

use crate::error::{Result, StoreError};
use crate::query::Query;
use crate::store::Store;
use crate::types::{Document, DocumentId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use tracing::debug;

/// A typed handle to one collection within a store.
///
/// Handles borrow their [`Store`], so one can only be obtained after the
/// base directory bootstrap has completed. The payload type `T` documents
/// the record shape; it is not enforced against records written by other
/// means.
pub struct Collection<'a, T> {
    store: &'a Store,
    name: String,
    _record: PhantomData<T>,
}

impl<'a, T> Collection<'a, T> {
    pub(crate) fn new(store: &'a Store, name: &str) -> Self {
        Self {
            store,
            name: name.to_string(),
            _record: PhantomData,
        }
    }

    /// Name of the underlying collection.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<'a, T> Collection<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    /// Store a new record, assigning it a fresh id, and return it.
    ///
    /// The read-append-write cycle runs under this collection's mutation
    /// lock: at most one `create` is in flight per collection per process.
    pub fn create(&self, data: T) -> Result<Document<T>> {
        let lock = self.store.collection_lock(&self.name);
        let _guard = lock.lock();

        let mut records = self.raw_records()?;
        let document = Document {
            id: DocumentId::new(),
            data,
        };
        records.push(self.encode(&document)?);
        self.store.write_all(&self.name, &records)?;

        debug!(collection = %self.name, id = %document.id, "created document");
        Ok(document)
    }

    /// First record matching `query`, in file order.
    pub fn find_one(&self, query: &Query) -> Result<Option<Document<T>>> {
        for object in self.raw_records()? {
            if query.matches(&object) {
                return self.decode(object).map(Some);
            }
        }
        Ok(None)
    }

    /// Every record matching `query`, in file order.
    ///
    /// The empty query matches all records.
    pub fn find_many(&self, query: &Query) -> Result<Vec<Document<T>>> {
        let mut matches = Vec::new();
        for object in self.raw_records()? {
            if query.matches(&object) {
                matches.push(self.decode(object)?);
            }
        }
        Ok(matches)
    }

    /// First record for which `pred` returns true, in file order.
    pub fn find_one_where<F>(&self, mut pred: F) -> Result<Option<Document<T>>>
    where
        F: FnMut(&Document<T>) -> bool,
    {
        for object in self.raw_records()? {
            let document = self.decode(object)?;
            if pred(&document) {
                return Ok(Some(document));
            }
        }
        Ok(None)
    }

    /// Every record for which `pred` returns true, in file order.
    pub fn find_many_where<F>(&self, mut pred: F) -> Result<Vec<Document<T>>>
    where
        F: FnMut(&Document<T>) -> bool,
    {
        let mut matches = Vec::new();
        for object in self.raw_records()? {
            let document = self.decode(object)?;
            if pred(&document) {
                matches.push(document);
            }
        }
        Ok(matches)
    }

    // --- Private Helpers ---

    fn raw_records(&self) -> Result<Vec<Map<String, Value>>> {
        self.store.read_all(&self.name)
    }

    fn encode(&self, document: &Document<T>) -> Result<Map<String, Value>> {
        let value = serde_json::to_value(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        match value {
            Value::Object(object) => Ok(object),
            _ => Err(StoreError::Serialization(format!(
                "record for collection '{}' did not serialize to a JSON object",
                self.name
            ))),
        }
    }

    fn decode(&self, object: Map<String, Value>) -> Result<Document<T>> {
        serde_json::from_value(Value::Object(object)).map_err(|e| StoreError::Parse {
            collection: self.name.clone(),
            message: e.to_string(),
        })
    }
}
