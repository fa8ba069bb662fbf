//! Error types for the background index worker
//!
//! None of these stop the worker: each one is turned into an `error`
//! response and the loop moves on to the next request.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    /// Request was not valid JSON or did not match the request schema
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Request `type` is not one the worker understands
    #[error("Unknown request type: {0}")]
    UnknownRequest(String),

    /// `index` request carried neither tables nor HTML
    #[error("Index request has no tables and no HTML")]
    EmptyIndexRequest,

    /// HTML mentions a table but none could be read from it
    #[error("Failed to extract tables from HTML: {0}")]
    Extraction(String),
}
