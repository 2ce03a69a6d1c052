//! Error types for kanji-core.

use thiserror::Error;

/// Result type alias using BuildError.
pub type Result<T> = std::result::Result<T, BuildError>;

/// How a row of the source table disagrees with the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    #[error("missing column {column}")]
    MissingColumn { column: String },

    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column {column} is not an integer: {value:?}")]
    NotAnInteger { column: String, value: String },
}

/// Errors that can occur while building a document from a TSV table.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("schema mismatch at row {row}: {mismatch}")]
    SchemaMismatch { row: usize, mismatch: SchemaMismatch },

    #[error("empty input: no header row")]
    EmptyInput,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when a document is loaded and validated.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("filter {filter} references unknown field {field}")]
    UnknownFilterField { filter: String, field: String },

    #[error("group {group} references unknown field {field}")]
    UnknownGroupField { group: String, field: String },

    #[error("mode {mode} references unknown group {group}")]
    UnknownGroup { mode: String, group: String },

    #[error("entry at position {position} has id {id}")]
    InvalidEntryIds { position: usize, id: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from session and display operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown mode {mode}")]
    UnknownMode { mode: String },

    #[error("document defines no display modes")]
    NoModes,

    #[error("unknown card id {id}")]
    UnknownCard { id: usize },
}
