//! Structure the highlighter operates on
//!
//! A cell only has to expose its text leaves in document order, split a
//! leaf at a byte offset, and wrap a run of leaves in a marker. The
//! highlighter never touches anything else, so it runs the same over the
//! live kuchiki DOM and over any other tree that implements these three
//! operations.

use super::errors::HighlightError;

pub trait HighlightTarget {
    /// Handle to one text-bearing leaf
    type Leaf: Clone;

    /// Every text leaf with its current text, in document order.
    fn text_leaves(&self) -> Vec<(Self::Leaf, String)>;

    /// Split `leaf` at byte `offset`.
    ///
    /// `leaf` keeps `[..offset]`; the returned leaf holds `[offset..]` and
    /// directly follows it. Returns `Ok(None)` when `offset` is the current
    /// end of the leaf.
    fn split_leaf(
        &mut self,
        leaf: &Self::Leaf,
        offset: usize,
    ) -> Result<Option<Self::Leaf>, HighlightError>;

    /// Wrap every leaf from `first` through `last` (document order,
    /// inclusive) in highlight markers.
    fn wrap_run(&mut self, first: &Self::Leaf, last: &Self::Leaf) -> Result<(), HighlightError>;
}
