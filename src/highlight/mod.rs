//! Search-term highlighting inside table cells
//!
//! A cell's text leaves are folded into a normalized key with a per-character
//! source map ([`OffsetMap`]). Query matches found in the key are resolved
//! back to leaf offsets and wrapped in marker elements without disturbing
//! the markup around them.

mod dom_target;
mod errors;
mod highlighter;
mod offset_map;
mod snapshot;
mod target;

pub use dom_target::DomCell;
pub use errors::HighlightError;
pub use highlighter::{HighlightReport, Highlighter, highlight};
pub use offset_map::{OffsetMap, SourcePosition, SourceRange};
pub use snapshot::CellSnapshot;
pub use target::HighlightTarget;
