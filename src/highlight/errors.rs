//! Error types for highlight application
//!
//! These never escape a highlight pass: each one aborts a single match,
//! which is logged and skipped.

use thiserror::Error;

/// Why a single match could not be highlighted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    /// Key range did not resolve to source positions
    #[error("Key range {start}..{end} does not resolve to source positions")]
    UnresolvedRange { start: usize, end: usize },

    /// Leaf index recorded in the offset map is missing
    #[error("Leaf {0} missing from offset map")]
    MissingLeaf(usize),

    /// Leaf is no longer a text leaf
    #[error("Leaf is no longer a text node")]
    NotText,

    /// Offset past the current end of the leaf
    #[error("Offset {offset} past end of leaf (length {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// Offset inside a multi-byte character
    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    /// Range selects nothing
    #[error("Empty highlight range")]
    EmptyRange,

    /// Leaves could not be located as a contiguous run
    #[error("Highlight run could not be located in the cell")]
    RunNotFound,

    /// Marker element could not be created
    #[error("Highlight marker could not be created")]
    MarkerUnavailable,
}
