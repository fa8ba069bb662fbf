use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::table::TableState;

/// Plain-text projection of one table, as handed to the encoders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub title: String,
    /// Header labels, empty when the table has no header row
    pub headers: Vec<String>,
    /// Trimmed cell text of every body row in current order
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Capture `table` as it currently stands, hidden rows included.
    #[must_use]
    pub fn from_table(table: &TableState) -> Self {
        Self {
            title: table.title().to_string(),
            headers: table.headers().to_vec(),
            rows: table.rows().iter().map(|row| row.texts()).collect(),
        }
    }

    /// Widest of the header row and every body row
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Distinct header labels, or `Col1`..`ColN` when the table has none.
    ///
    /// Blank header cells also fall back to their positional label. A label
    /// already taken by an earlier column gets its 1-based position as a
    /// ` (N)` suffix.
    #[must_use]
    pub fn column_labels(&self) -> Vec<String> {
        let mut taken = HashSet::new();
        (0..self.width())
            .map(|i| {
                let base = match self.headers.get(i) {
                    Some(label) if !label.trim().is_empty() => label.clone(),
                    _ => format!("Col{}", i + 1),
                };
                let mut label = base.clone();
                let mut suffix = i + 1;
                while !taken.insert(label.clone()) {
                    label = format!("{base} ({suffix})");
                    suffix += 1;
                }
                label
            })
            .collect()
    }

    /// Header row (when present) followed by the body rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &[String]> {
        let header = (!self.headers.is_empty()).then_some(self.headers.as_slice());
        header
            .into_iter()
            .chain(self.rows.iter().map(Vec::as_slice))
    }
}
