//! Row visibility from search results

use serde::{Deserialize, Serialize};

use crate::highlight::Highlighter;

use super::model::TableState;

/// Visible and total body rows of one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCounts {
    pub visible: usize,
    pub total: usize,
}

impl RowCounts {
    #[must_use]
    pub fn of(table: &TableState) -> Self {
        Self {
            visible: table.rows().iter().filter(|row| row.is_visible()).count(),
            total: table.rows().len(),
        }
    }

    /// Row-count caption shown under a table.
    ///
    /// ```
    /// # use kodegen_tools_tableview::table::RowCounts;
    /// assert_eq!(RowCounts { visible: 3, total: 3 }.label(), "Showing 3 rows");
    /// assert_eq!(RowCounts { visible: 1, total: 3 }.label(), "Showing 1 of 3 rows");
    /// assert_eq!(RowCounts { visible: 0, total: 0 }.label(), "Showing 0 rows");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        if self.total == 0 {
            "Showing 0 rows".to_string()
        } else if self.visible == self.total {
            format!("Showing {} rows", self.total)
        } else {
            format!("Showing {} of {} rows", self.visible, self.total)
        }
    }
}

/// Show rows matching `query_key`, hide the rest, highlight the matches.
///
/// Every cell is restored to its baseline first. A row matches when any of
/// its cells' keys contains `query_key`; only cells of matching rows are
/// highlighted. An empty key shows every row without highlights.
///
/// Returns the position of the first matching row in current order.
pub fn apply_filter(
    table: &mut TableState,
    query_key: &str,
    highlighter: &Highlighter,
) -> Option<usize> {
    let mode = highlighter.mode();
    let mut first_match = None;

    for (position, row) in table.rows_mut().iter_mut().enumerate() {
        row.restore();

        if query_key.is_empty() {
            row.set_visible(true);
            continue;
        }

        let matches = row
            .cells()
            .iter()
            .any(|cell| cell.key(mode).contains(query_key));
        row.set_visible(matches);

        if matches {
            for cell in row.cells() {
                highlighter.highlight_cell(cell.node(), query_key);
            }
            first_match.get_or_insert(position);
        }
    }

    first_match
}
