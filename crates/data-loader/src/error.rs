//! Error types for the data-loader crate.
//!
//! Two severities are kept apart on purpose:
//! - [`DataLoadError`] means an operation cannot run at all (missing file,
//!   store that will not open, statement that will not prepare). Callers
//!   are expected to stop.
//! - [`RowRejection`] describes one bad source row. The ingestion loop logs
//!   it and moves on to the next row.

use std::path::PathBuf;
use thiserror::Error;

/// Setup failures that abort an operation.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Source file could not be opened
    #[error("Failed to open file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing store could not be opened
    #[error("Failed to open store {}: {source}", .path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Schema script failed
    #[error("Failed to create schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// The insert statement for a table could not be prepared
    #[error("Failed to prepare insert for {table}: {source}")]
    Prepare {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// The full-replace clear before a load failed
    #[error("Failed to clear {table}: {source}")]
    Clear {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A read-only query failed
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl DataLoadError {
    /// True when the failure means the operation was structurally impossible,
    /// as opposed to a query that failed after setup succeeded.
    pub fn is_setup_failure(&self) -> bool {
        !matches!(self, DataLoadError::Query(_))
    }
}

/// Why a single source row was not accepted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowRejection {
    /// The reader could not produce a record for this row
    #[error("malformed row: {0}")]
    Malformed(String),

    #[error("expected at least {expected} fields but found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid integer for {field}: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("invalid number for {field}: {value:?}")]
    InvalidReal { field: &'static str, value: String },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("empty {field}")]
    EmptyField { field: &'static str },

    #[error("invalid gender: {value:?}")]
    InvalidGender { value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_failures_are_distinct_from_query_failures() {
        let open = DataLoadError::FileOpen {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(open.is_setup_failure());

        let prepare = DataLoadError::Prepare {
            table: "movies",
            source: rusqlite::Error::InvalidQuery,
        };
        assert!(prepare.is_setup_failure());

        let query = DataLoadError::Query(rusqlite::Error::InvalidQuery);
        assert!(!query.is_setup_failure());
    }

    #[test]
    fn test_rejection_messages_name_the_value() {
        let rejection = RowRejection::InvalidGender {
            value: "X".to_string(),
        };
        assert_eq!(rejection.to_string(), "invalid gender: \"X\"");

        let rejection = RowRejection::EmptyField { field: "title" };
        assert_eq!(rejection.to_string(), "empty title");
    }
}
