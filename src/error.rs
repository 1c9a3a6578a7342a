use thiserror::Error;

use crate::traits::SlotError;

/// Error type for pgrs-orm operations
#[derive(Debug, Error)]
pub enum OrmError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("{descriptor} accepts at most one argument, got {count}")]
    TooManyArguments {
        descriptor: &'static str,
        count: usize,
    },

    #[error("Record {record} declares {expected} field(s) but exposes {actual} slot(s)")]
    MappingMismatch {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Row has {actual} column(s), {expected} slot(s) given")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("Failed to scan column {column}: {source}")]
    ScanFailed {
        column: String,
        #[source]
        source: SlotError,
    },

    #[error("SELECT from {table} has no mapped columns")]
    EmptySelect { table: String },

    #[error("Missing configuration value: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },
}

/// Result type alias for pgrs-orm operations
pub type Result<T> = std::result::Result<T, OrmError>;
