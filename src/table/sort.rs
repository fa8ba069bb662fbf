//! Tri-state column sorting
//!
//! Each column cycles unsorted → ascending → descending → unsorted. Only one
//! column is sorted at a time. Cell values that parse as numbers (after
//! dropping thousands separators) sort numerically and ahead of text; text
//! compares by [`collation_key`].

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::collation_key;

/// Leading decimal literal, as accepted by a lenient float parser
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("BUG: hardcoded number regex is statically valid")
});

/// Sort direction of one column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Next state in the click cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            SortDirection::Unsorted => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Unsorted,
        }
    }

    /// `0`, `1` or `2`, as used by header sort buttons.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            SortDirection::Unsorted => 0,
            SortDirection::Ascending => 1,
            SortDirection::Descending => 2,
        }
    }

    /// Value for the header's `aria-sort` attribute.
    #[must_use]
    pub fn aria(self) -> &'static str {
        match self {
            SortDirection::Unsorted => "none",
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// Per-column sort state of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    columns: Vec<SortDirection>,
}

impl SortState {
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns: vec![SortDirection::Unsorted; columns],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn get(&self, column: usize) -> SortDirection {
        self.columns.get(column).copied().unwrap_or_default()
    }

    /// Advance `column` one step and reset every other column.
    ///
    /// Returns the new direction of `column`, or `None` when the column
    /// does not exist.
    pub fn advance(&mut self, column: usize) -> Option<SortDirection> {
        let next = self.columns.get(column)?.next();
        self.clear();
        self.columns[column] = next;
        Some(next)
    }

    pub fn clear(&mut self) {
        self.columns.fill(SortDirection::Unsorted);
    }

    /// The sorted column, if any.
    #[must_use]
    pub fn active(&self) -> Option<(usize, SortDirection)> {
        self.columns
            .iter()
            .copied()
            .enumerate()
            .find(|(_, dir)| *dir != SortDirection::Unsorted)
    }

    #[must_use]
    pub fn codes(&self) -> Vec<u8> {
        self.columns.iter().map(|dir| dir.code()).collect()
    }
}

/// Parse the leading number of `text` once thousands separators are removed.
///
/// Mirrors a lenient float parser: `"1,234.5 kg"` is `1234.5`, `"abc"` and
/// `""` are not numbers.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let stripped: String = text.trim().chars().filter(|&c| c != ',').collect();
    let literal = LEADING_NUMBER.find(&stripped)?.as_str();
    let value = match literal.trim_start_matches(['+', '-']) {
        "Infinity" => f64::INFINITY,
        _ => literal.trim_start_matches('+').parse::<f64>().ok()?,
    };
    Some(if literal.starts_with('-') { -value.abs() } else { value })
}

/// Precomputed comparison key of one cell
#[derive(Debug, Clone)]
enum SortKey {
    Number(f64),
    Text { collated: String, raw: String },
}

impl SortKey {
    fn of(text: &str) -> Self {
        let text = text.trim();
        match parse_number(text) {
            Some(value) => SortKey::Number(value),
            None => SortKey::Text {
                collated: collation_key(text),
                raw: text.to_string(),
            },
        }
    }

    /// Numbers before text. Numbers compare by value, so `-0` ties `0`;
    /// text compares by collation key then raw text.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortKey::Number(_), SortKey::Text { .. }) => Ordering::Less,
            (SortKey::Text { .. }, SortKey::Number(_)) => Ordering::Greater,
            (
                SortKey::Text { collated: a, raw: ra },
                SortKey::Text { collated: b, raw: rb },
            ) => a.cmp(b).then_with(|| ra.cmp(rb)),
        }
    }
}

/// Compare two cell texts the way a column sort does (ascending).
#[must_use]
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}

/// Stably sort `items` by the text `key` extracts, in `direction`.
///
/// Ties keep their current relative order in both directions.
/// [`SortDirection::Unsorted`] leaves `items` untouched.
pub fn sort_by_text<T, F>(items: &mut Vec<T>, direction: SortDirection, key: F)
where
    F: Fn(&T) -> String,
{
    if direction == SortDirection::Unsorted {
        return;
    }
    let mut keyed: Vec<(SortKey, T)> = items
        .drain(..)
        .map(|item| (SortKey::of(&key(&item)), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Descending => b.cmp(a),
        _ => a.cmp(b),
    });
    items.extend(keyed.into_iter().map(|(_, item)| item));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_back_to_unsorted() {
        let mut state = SortState::new(3);
        assert_eq!(state.advance(1), Some(SortDirection::Ascending));
        assert_eq!(state.advance(1), Some(SortDirection::Descending));
        assert_eq!(state.advance(1), Some(SortDirection::Unsorted));
        assert_eq!(state.advance(5), None);
    }

    #[test]
    fn advancing_one_column_resets_the_others() {
        let mut state = SortState::new(3);
        state.advance(0);
        state.advance(0);
        assert_eq!(state.advance(2), Some(SortDirection::Ascending));
        assert_eq!(state.codes(), vec![0, 0, 1]);
        assert_eq!(state.active(), Some((2, SortDirection::Ascending)));
    }

    #[test]
    fn parse_number_is_lenient_about_suffixes_and_separators() {
        assert_eq!(parse_number("1,234.5 kg"), Some(1234.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
    }

    #[test]
    fn numbers_sort_before_text_and_by_value() {
        let mut values = vec!["10", "2", "apple", "2"];
        sort_by_text(&mut values, SortDirection::Ascending, |v| v.to_string());
        assert_eq!(values, vec!["2", "2", "10", "apple"]);
    }

    #[test]
    fn negative_and_positive_zero_tie() {
        let mut values = vec![("-0", 0), ("0", 1), ("-0", 2)];
        sort_by_text(&mut values, SortDirection::Ascending, |v| v.0.to_string());
        assert_eq!(values, vec![("-0", 0), ("0", 1), ("-0", 2)]);
    }

    #[test]
    fn ties_keep_source_order_in_both_directions() {
        let rows = vec![("b", 1), ("a", 2), ("b", 3), ("a", 4)];

        let mut asc = rows.clone();
        sort_by_text(&mut asc, SortDirection::Ascending, |r| r.0.to_string());
        assert_eq!(asc, vec![("a", 2), ("a", 4), ("b", 1), ("b", 3)]);

        let mut desc = rows;
        sort_by_text(&mut desc, SortDirection::Descending, |r| r.0.to_string());
        assert_eq!(desc, vec![("b", 1), ("b", 3), ("a", 2), ("a", 4)]);
    }

    #[test]
    fn text_compares_case_and_accent_insensitively() {
        assert_eq!(compare_cells("éclair", "Eclairs"), Ordering::Less);
        assert_eq!(compare_cells("Banana", "apple"), Ordering::Greater);
    }
}
