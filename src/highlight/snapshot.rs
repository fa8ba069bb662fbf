//! Cell baseline snapshots
//!
//! The first time a cell is about to be highlighted its children are copied
//! aside. Every later search restores that copy before highlighting again,
//! so markers never nest and text split for one query is whole again for
//! the next.

use kuchiki::NodeRef;

use crate::dom::node_util::{clear_children, deep_clone, inner_html};
use crate::errors::TableViewResult;

/// Pre-highlight content of one cell
#[derive(Debug, Clone, Default)]
pub struct CellSnapshot {
    baseline: Option<Vec<NodeRef>>,
}

impl CellSnapshot {
    /// Record the current children of `cell` unless a baseline already exists.
    ///
    /// Returns `true` when this call recorded the baseline.
    pub fn capture(&mut self, cell: &NodeRef) -> bool {
        if self.baseline.is_some() {
            return false;
        }
        self.baseline = Some(cell.children().map(|child| deep_clone(&child)).collect());
        true
    }

    /// Replace the children of `cell` with a fresh copy of the baseline.
    ///
    /// Returns `false`, leaving the cell untouched, when nothing was captured.
    pub fn restore(&self, cell: &NodeRef) -> bool {
        let Some(baseline) = &self.baseline else {
            return false;
        };
        clear_children(cell);
        for node in baseline {
            cell.append(deep_clone(node));
        }
        true
    }

    /// Forget the baseline so the next capture records the cell afresh.
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.baseline.is_some()
    }

    /// Serialized baseline, if captured.
    pub fn markup(&self) -> TableViewResult<Option<String>> {
        let Some(baseline) = &self.baseline else {
            return Ok(None);
        };
        let holder = NodeRef::new_document();
        for node in baseline {
            holder.append(deep_clone(node));
        }
        inner_html(&holder).map(Some)
    }
}
