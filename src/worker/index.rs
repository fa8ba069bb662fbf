//! Flattened row index searched by the worker

use crate::highlight::OffsetMap;
use crate::text::{NormalizeMode, normalize_with};
use crate::utils::{ROW_TEXT_SEPARATOR, centered_window};

use super::types::TableRecord;

/// Mode every worker key is built with
pub const WORKER_MODE: NormalizeMode = NormalizeMode::Ascii;

/// One body row: display text and its search key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRow {
    pub text: String,
    pub key: String,
}

impl IndexedRow {
    fn new(cells: &[String]) -> Self {
        let text = cells
            .iter()
            .map(|c| c.trim())
            .collect::<Vec<_>>()
            .join(ROW_TEXT_SEPARATOR);
        let key = normalize_with(&text, WORKER_MODE);
        Self { text, key }
    }

    /// Up to `window` characters of the row text around the first
    /// occurrence of `query_key`.
    #[must_use]
    pub fn snippet(&self, query_key: &str, window: usize) -> String {
        let map = OffsetMap::build([((), self.text.clone())], WORKER_MODE);
        let focus = map
            .find_all(query_key)
            .first()
            .and_then(|&(start, end)| map.resolve(start, end))
            .map_or(0, |range| range.start_offset);
        centered_window(&self.text, focus, window).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedTable {
    pub id: String,
    pub headers: Vec<String>,
    pub rows: Vec<IndexedRow>,
}

/// Every indexed table in insertion order
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    tables: Vec<IndexedTable>,
}

impl RowIndex {
    /// Replace the index contents with `records`.
    pub fn replace(&mut self, records: Vec<TableRecord>) {
        self.tables = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| IndexedTable {
                id: record.id.unwrap_or_else(|| format!("table-{i}")),
                headers: record.headers,
                rows: record.rows.iter().map(|cells| IndexedRow::new(cells)).collect(),
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }

    #[must_use]
    pub fn tables(&self) -> &[IndexedTable] {
        &self.tables
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }

    /// `(table, row)` of every row in scan order
    #[must_use]
    pub fn positions(&self) -> Vec<(usize, usize)> {
        self.tables
            .iter()
            .enumerate()
            .flat_map(|(t, table)| (0..table.rows.len()).map(move |r| (t, r)))
            .collect()
    }

    #[must_use]
    pub fn row(&self, table: usize, row: usize) -> Option<&IndexedRow> {
        self.tables.get(table)?.rows.get(row)
    }
}
