use kuchiki::NodeRef;

use crate::dom::node_util::deep_clone;

/// Pristine copies of a table's body rows, taken once when the table is
/// bound and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RowSnapshot {
    rows: Vec<NodeRef>,
}

impl RowSnapshot {
    pub(crate) fn capture<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a NodeRef>,
    {
        Self {
            rows: rows.into_iter().map(deep_clone).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fresh detached copies of every row in original order.
    ///
    /// Each call produces new nodes, so the snapshot itself is never
    /// inserted into the live document.
    pub(crate) fn materialize(&self) -> Vec<NodeRef> {
        self.rows.iter().map(deep_clone).collect()
    }
}
