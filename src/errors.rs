//! Error types for table operations
//!
//! Per-cell and per-match failures never surface here: the highlighter and
//! the visibility pass swallow them and log. These errors cover requests the
//! caller made that cannot be honoured at all.

use thiserror::Error;

/// Result type alias for table operations
pub type TableViewResult<T> = Result<T, TableViewError>;

/// Error types for table operations
#[derive(Debug, Error)]
pub enum TableViewError {
    /// No table registered at this index
    #[error("Table {0} not found")]
    TableNotFound(usize),

    /// Column index past the table's column count
    #[error("Column {column} out of range for table {table} ({columns} columns)")]
    ColumnOutOfRange {
        table: usize,
        column: usize,
        columns: usize,
    },

    /// CSS selector rejected by the selector engine
    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    /// Serializing the live document failed
    #[error("Failed to serialize HTML: {0}")]
    Serialization(String),

    /// Configuration rejected by the builder
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing an export to disk failed
    #[error("Export failed: {0}")]
    Export(String),

    /// Background worker channel closed
    #[error("Table index worker disconnected")]
    WorkerDisconnected,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<anyhow::Error> for TableViewError {
    fn from(error: anyhow::Error) -> Self {
        TableViewError::Export(format!("{error:#}"))
    }
}

impl TableViewError {
    /// Whether the error came from a bad table or column index supplied by the caller
    #[must_use]
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            TableViewError::TableNotFound(_) | TableViewError::ColumnOutOfRange { .. }
        )
    }
}
