//! Error types for the multisearch crate.
//!
//! Matching never fails: malformed query text only ever degrades to "no
//! match". The errors below cover engine construction and record ingestion.

use thiserror::Error;

/// Errors that can occur when building an engine or ingesting records.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The record source was not a JSON array.
    #[error("expected a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },

    /// An element of the record source was not a JSON object.
    #[error("record {index} is not an object (found {found})")]
    InvalidRecord { index: usize, found: &'static str },

    /// Two field descriptors share the same name.
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    /// The global search replacement names a field that was never declared.
    #[error("global search replacement '{0}' is not a declared field")]
    UnknownField(String),

    /// Engine options could not be deserialized.
    #[error("invalid engine options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Result type for multisearch operations.
pub type Result<T> = std::result::Result<T, SearchError>;
