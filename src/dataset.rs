//! Loading and holding the record collection.
//!
//! The collection is read once at startup and never mutated afterwards, so a
//! [`RecordSet`] can sit behind an `Arc` and be read by any number of request
//! handlers without locking.

use crate::error::{kind_of, DataError};
use crate::record::Record;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Immutable, ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Wrap records that were built in memory.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of objects.
    pub fn from_json_str(text: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    /// Build from an already-parsed JSON value.
    pub fn from_json_value(value: Value) -> Result<Self, DataError> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(DataError::NotAnArray(kind_of(&other))),
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(fields) => records.push(Record::new(fields)),
                other => {
                    return Err(DataError::NotAnObject {
                        index,
                        found: kind_of(&other),
                    })
                }
            }
        }

        let nested: usize = records.iter().map(Record::non_scalar_fields).sum();
        if nested > 0 {
            tracing::warn!(
                fields = nested,
                "record collection contains non-scalar field values; they will match on their JSON text"
            );
        }

        Ok(Self { records })
    }

    /// Read and parse a data file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), records = set.len(), "loaded record collection");
        Ok(set)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
