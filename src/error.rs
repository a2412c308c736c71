use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a record collection.
#[derive(Debug, Error)]
pub enum DataError {
    /// The data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The content is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level value is not an array of records.
    #[error("expected a JSON array of records, found {0}")]
    NotAnArray(&'static str),
    /// An element of the array is not a JSON object.
    #[error("record at index {index} is not an object (found {found})")]
    NotAnObject { index: usize, found: &'static str },
}

/// Short name of a JSON value's kind, used in error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
