//! kuchiki implementation of [`HighlightTarget`]
//!
//! Wrapping a run that crosses element boundaries first lifts each end of
//! the run to the outermost ancestor that lies entirely inside the match.
//! When both ends then share a parent the whole run goes into one marker
//! (`Caf<b>é</b>` becomes `<mark>Caf<b>é</b></mark>`). When they do not, for
//! example a match that starts mid-way through a bold span and ends outside
//! it, each text leaf of the run is wrapped in its own marker so no
//! character outside the match is ever highlighted.

use kuchiki::NodeRef;

use crate::dom::node_util::{
    SplitError, contains, move_to_end, shallow_clone_element, split_text, text_descendants,
};

use super::errors::HighlightError;
use super::target::HighlightTarget;

/// One table cell in the live document
pub struct DomCell<'a> {
    root: &'a NodeRef,
    marker: &'a NodeRef,
}

impl<'a> DomCell<'a> {
    /// `marker` is a detached element copied (without children) for every
    /// highlight this cell receives.
    pub fn new(root: &'a NodeRef, marker: &'a NodeRef) -> Self {
        Self { root, marker }
    }

    fn new_marker(&self) -> Result<NodeRef, HighlightError> {
        shallow_clone_element(self.marker).ok_or(HighlightError::MarkerUnavailable)
    }

    /// Climb from the run's first leaf while everything after it in the
    /// parent is still inside the run.
    fn lift_start(&self, node: &NodeRef, last: &NodeRef) -> NodeRef {
        let mut current = node.clone();
        while let Some(parent) = current.parent() {
            if parent == *self.root
                || current.previous_sibling().is_some()
                || contains(&parent, last)
            {
                break;
            }
            current = parent;
        }
        current
    }

    /// Climb from the run's last leaf while everything before it in the
    /// parent is still inside the run.
    fn lift_end(&self, node: &NodeRef, first: &NodeRef) -> NodeRef {
        let mut current = node.clone();
        while let Some(parent) = current.parent() {
            if parent == *self.root
                || current.next_sibling().is_some()
                || contains(&parent, first)
            {
                break;
            }
            current = parent;
        }
        current
    }

    /// Text leaves from `first` through `last` in document order.
    fn leaves_between(&self, first: &NodeRef, last: &NodeRef) -> Option<Vec<NodeRef>> {
        let mut run = Vec::new();
        let mut collecting = false;
        for leaf in text_descendants(self.root) {
            if leaf == *first {
                collecting = true;
            }
            if collecting {
                let done = leaf == *last;
                run.push(leaf);
                if done {
                    return Some(run);
                }
            }
        }
        None
    }
}

/// Siblings from `start` through `end` inclusive, if `end` follows `start`
/// under the same parent.
fn sibling_run(start: &NodeRef, end: &NodeRef) -> Option<Vec<NodeRef>> {
    if start.parent()? != end.parent()? {
        return None;
    }
    let mut run = vec![start.clone()];
    let mut current = start.clone();
    while current != *end {
        current = current.next_sibling()?;
        run.push(current.clone());
    }
    Some(run)
}

/// Text nodes under `root` paired with their current text.
pub(crate) fn text_leaves_of(root: &NodeRef) -> Vec<(NodeRef, String)> {
    text_descendants(root)
        .into_iter()
        .filter_map(|node| {
            let text = node.as_text()?.borrow().clone();
            Some((node, text))
        })
        .collect()
}

impl From<SplitError> for HighlightError {
    fn from(error: SplitError) -> Self {
        match error {
            SplitError::NotText => HighlightError::NotText,
            SplitError::OutOfBounds { offset, len } => {
                HighlightError::OffsetOutOfBounds { offset, len }
            }
            SplitError::NotCharBoundary(offset) => HighlightError::NotCharBoundary(offset),
        }
    }
}

impl HighlightTarget for DomCell<'_> {
    type Leaf = NodeRef;

    fn text_leaves(&self) -> Vec<(NodeRef, String)> {
        text_leaves_of(self.root)
    }

    fn split_leaf(
        &mut self,
        leaf: &NodeRef,
        offset: usize,
    ) -> Result<Option<NodeRef>, HighlightError> {
        Ok(split_text(leaf, offset)?)
    }

    fn wrap_run(&mut self, first: &NodeRef, last: &NodeRef) -> Result<(), HighlightError> {
        if !contains(self.root, first) || !contains(self.root, last) {
            return Err(HighlightError::RunNotFound);
        }

        let start_top = self.lift_start(first, last);
        let end_top = self.lift_end(last, first);

        if let Some(run) = sibling_run(&start_top, &end_top) {
            let mark = self.new_marker()?;
            start_top.insert_before(mark.clone());
            for node in run {
                move_to_end(&mark, &node);
            }
            return Ok(());
        }

        let leaves = self
            .leaves_between(first, last)
            .ok_or(HighlightError::RunNotFound)?;
        for leaf in leaves {
            let empty = leaf
                .as_text()
                .is_none_or(|text| text.borrow().trim().is_empty());
            if empty {
                continue;
            }
            let mark = self.new_marker()?;
            leaf.insert_before(mark.clone());
            move_to_end(&mark, &leaf);
        }
        Ok(())
    }
}
