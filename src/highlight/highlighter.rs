//! Highlight pass over a single cell

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use tracing::debug;

use crate::config::TableViewConfig;
use crate::errors::{TableViewError, TableViewResult};
use crate::text::NormalizeMode;

use super::dom_target::DomCell;
use super::errors::HighlightError;
use super::offset_map::OffsetMap;
use super::target::HighlightTarget;

/// Outcome of highlighting one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightReport {
    /// Non-overlapping occurrences found in the cell key
    pub matches: usize,
    /// Occurrences wrapped in a marker
    pub applied: usize,
    /// Occurrences abandoned after a per-match failure
    pub skipped: usize,
}

/// Highlight every occurrence of `query_key` in `target`.
///
/// `query_key` must already be normalized with `mode`. Matches are applied
/// from last to first so that splitting a leaf for a later match never moves
/// the offsets of an earlier one. A failure aborts only the match it
/// happened in.
pub fn highlight<T: HighlightTarget>(
    target: &mut T,
    query_key: &str,
    mode: NormalizeMode,
) -> HighlightReport {
    let mut report = HighlightReport::default();
    if query_key.is_empty() {
        return report;
    }

    let map = OffsetMap::build(target.text_leaves(), mode);
    let found = map.find_all(query_key);
    report.matches = found.len();

    for &(start, end) in found.iter().rev() {
        match apply_match(target, &map, start, end) {
            Ok(()) => report.applied += 1,
            Err(error) => {
                report.skipped += 1;
                debug!(start, end, %error, "Skipping highlight match");
            }
        }
    }
    report
}

fn apply_match<T: HighlightTarget>(
    target: &mut T,
    map: &OffsetMap<T::Leaf>,
    start: usize,
    end: usize,
) -> Result<(), HighlightError> {
    let range = map
        .resolve(start, end)
        .ok_or(HighlightError::UnresolvedRange { start, end })?;
    let leaf_at = |idx: usize| {
        map.leaves()
            .get(idx)
            .cloned()
            .ok_or(HighlightError::MissingLeaf(idx))
    };

    let start_leaf = leaf_at(range.start_leaf)?;
    let end_leaf = if range.is_single_leaf() {
        if range.start_offset >= range.end_offset {
            return Err(HighlightError::EmptyRange);
        }
        start_leaf.clone()
    } else {
        leaf_at(range.end_leaf)?
    };

    // End first: the start leaf keeps its prefix when split, so this order
    // works whether or not both ends sit in the same leaf.
    target.split_leaf(&end_leaf, range.end_offset)?;
    let first = if range.start_offset == 0 {
        start_leaf
    } else {
        target
            .split_leaf(&start_leaf, range.start_offset)?
            .ok_or(HighlightError::EmptyRange)?
    };

    let last = if range.is_single_leaf() {
        first.clone()
    } else {
        end_leaf
    };
    target.wrap_run(&first, &last)
}

/// Applies highlight markers to live cells
#[derive(Debug, Clone)]
pub struct Highlighter {
    marker: NodeRef,
    mode: NormalizeMode,
}

impl Highlighter {
    /// Create a highlighter wrapping matches in `<tag class="class">`.
    ///
    /// An empty `class` produces markers without a class attribute.
    pub fn new(tag: &str, class: &str) -> TableViewResult<Self> {
        let markup = if class.is_empty() {
            format!("<{tag}></{tag}>")
        } else {
            format!(
                "<{tag} class=\"{}\"></{tag}>",
                html_escape::encode_double_quoted_attribute(class)
            )
        };

        let document = kuchiki::parse_html().one(markup);
        let marker = document
            .select_first(tag)
            .map_err(|()| {
                TableViewError::InvalidConfig(format!(
                    "highlight tag `{tag}` does not produce an element"
                ))
            })?
            .as_node()
            .clone();
        marker.detach();

        Ok(Self {
            marker,
            mode: NormalizeMode::default(),
        })
    }

    pub fn from_config(config: &TableViewConfig) -> TableViewResult<Self> {
        Self::new(config.highlight_tag(), config.highlight_class())
    }

    #[must_use]
    pub fn with_mode(mut self, mode: NormalizeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn mode(&self) -> NormalizeMode {
        self.mode
    }

    /// Highlight `query_key` inside one `<td>`/`<th>`.
    pub fn highlight_cell(&self, cell: &NodeRef, query_key: &str) -> HighlightReport {
        let mut target = DomCell::new(cell, &self.marker);
        highlight(&mut target, query_key, self.mode)
    }
}
