//! Table model, sorting and row visibility

mod model;
mod row_snapshot;
mod sort;
mod visibility;

pub use model::{COLLAPSED_CLASS, Cell, Row, TableState, WRAPPER_CLASS};
pub use row_snapshot::RowSnapshot;
pub use sort::{SortDirection, SortState, compare_cells, parse_number, sort_by_text};
pub use visibility::{RowCounts, apply_filter};
