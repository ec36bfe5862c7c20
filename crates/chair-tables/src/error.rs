//! Error types for chair-tables

use thiserror::Error;

/// Errors that can occur while reading input tables or writing reports
#[derive(Error, Debug)]
pub enum TableError {
    /// IO error
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP error while fetching a remote table
    #[error("HTTP error fetching {url}: {detail}")]
    Http { url: String, detail: String },

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required cell is absent from a row
    #[error("{table} row {row} is missing column {column}")]
    MissingColumn {
        table: &'static str,
        row: usize,
        column: usize,
    },

    /// Unrecognised schema, format or similar option value
    #[error("unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },

    /// Error raised by the chair engine
    #[error(transparent)]
    Core(#[from] chair_core::ChairError),
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;
