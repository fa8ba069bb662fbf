//! Normalized offset map
//!
//! Links every character of a cell's normalized key back to the text leaf
//! and byte offset it was derived from. The key may be shorter than the
//! source (dropped punctuation, folded accents) or span several leaves; the
//! map keeps the correspondence exact and order-preserving so a match found
//! in the key can be resolved to real source ranges.
//!
//! Offsets are UTF-8 byte offsets into the leaf text. Each position also
//! records the byte width of its source character, so a range ending on a
//! multi-byte character (including characters outside the BMP) ends after
//! the whole character, never inside it.

use crate::text::{NormalizeMode, fold_char, push_key_char, trim_key_end};

/// Source location of one normalized key character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// Index into [`OffsetMap::leaves`]
    pub leaf: usize,
    /// Byte offset of the source character within the leaf text
    pub offset: usize,
    /// UTF-8 width of the source character
    pub width: usize,
}

impl SourcePosition {
    /// Byte offset just past the source character
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// Resolved source range of one key match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub start_leaf: usize,
    pub start_offset: usize,
    pub end_leaf: usize,
    /// Exclusive byte offset in the end leaf
    pub end_offset: usize,
}

impl SourceRange {
    #[inline]
    #[must_use]
    pub fn is_single_leaf(&self) -> bool {
        self.start_leaf == self.end_leaf
    }
}

/// Normalized key of a cell plus the per-character source mapping
#[derive(Debug, Clone)]
pub struct OffsetMap<L> {
    key: String,
    /// Byte offset of each key character inside `key`
    char_starts: Vec<usize>,
    /// One entry per key character
    positions: Vec<SourcePosition>,
    leaves: Vec<L>,
    leaf_lens: Vec<usize>,
}

impl<L> OffsetMap<L> {
    /// Build the map from text leaves in document order.
    ///
    /// Leaves whose text is empty or only whitespace are skipped entirely so
    /// that structural boundaries (an inline element next to punctuation,
    /// indentation between tags) never join or split tokens.
    pub fn build<I>(leaves: I, mode: NormalizeMode) -> Self
    where
        I: IntoIterator<Item = (L, String)>,
    {
        let mut map = OffsetMap {
            key: String::new(),
            char_starts: Vec::new(),
            positions: Vec::new(),
            leaves: Vec::new(),
            leaf_lens: Vec::new(),
        };

        for (leaf, text) in leaves {
            if text.trim().is_empty() {
                continue;
            }
            let leaf_idx = map.leaves.len();
            for (offset, ch) in text.char_indices() {
                let width = ch.len_utf8();
                fold_char(ch, mode, |c| {
                    let start = map.key.len();
                    if push_key_char(&mut map.key, c) {
                        map.char_starts.push(start);
                        map.positions.push(SourcePosition {
                            leaf: leaf_idx,
                            offset,
                            width,
                        });
                    }
                });
            }
            map.leaf_lens.push(text.len());
            map.leaves.push(leaf);
        }

        if trim_key_end(&mut map.key) {
            map.char_starts.pop();
            map.positions.pop();
        }
        map
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[SourcePosition] {
        &self.positions
    }

    #[inline]
    #[must_use]
    pub fn leaves(&self) -> &[L] {
        &self.leaves
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// All non-overlapping occurrences of `query` in the key, as key
    /// character ranges `[start, end)`, scanning left to right.
    ///
    /// The next search starts right after the previous match, so matches may
    /// touch but never overlap.
    #[must_use]
    pub fn find_all(&self, query: &str) -> Vec<(usize, usize)> {
        let mut matches = Vec::new();
        if query.is_empty() || self.key.is_empty() {
            return matches;
        }

        let mut from = 0;
        while from <= self.key.len() {
            let Some(pos) = self.key[from..].find(query) else {
                break;
            };
            let byte_start = from + pos;
            let byte_end = byte_start + query.len();
            let (Some(start), Some(end)) = (self.char_index(byte_start), self.char_end(byte_end))
            else {
                break;
            };
            matches.push((start, end));
            from = byte_end;
        }
        matches
    }

    /// Resolve a key character range to source leaves and offsets.
    ///
    /// The end offset is advanced past the full width of the last matched
    /// source character and clamped to the end leaf's length. Returns `None`
    /// when the range is empty or outside the key.
    #[must_use]
    pub fn resolve(&self, start: usize, end: usize) -> Option<SourceRange> {
        if start >= end {
            return None;
        }
        let first = self.positions.get(start)?;
        let last = self.positions.get(end - 1)?;
        let end_len = *self.leaf_lens.get(last.leaf)?;

        Some(SourceRange {
            start_leaf: first.leaf,
            start_offset: first.offset,
            end_leaf: last.leaf,
            end_offset: last.end().min(end_len),
        })
    }

    fn char_index(&self, byte: usize) -> Option<usize> {
        self.char_starts.binary_search(&byte).ok()
    }

    /// Key character count up to `byte`, which must be a char boundary.
    fn char_end(&self, byte: usize) -> Option<usize> {
        if byte == self.key.len() {
            return Some(self.char_starts.len());
        }
        self.char_index(byte)
    }
}
