//! Per-document table session
//!
//! A [`Session`] owns the parsed host document and the state of every
//! interactive table in it: row snapshots, sort state, cell baselines, the
//! active query and collapse flags. All operations run synchronously to
//! completion; the session is single-threaded (the DOM is `Rc`-based), and
//! `&mut self` gives each operation exclusive access to the tables it
//! touches.

mod debounce;

pub use debounce::{Debouncer, debounce_queries};

use chrono::Local;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TableViewConfig;
use crate::dom::node_util::outer_html;
use crate::errors::{TableViewError, TableViewResult};
use crate::export::{Export, ExportFormat, ExportNaming, TableData, encode_table, encode_tables};
use crate::highlight::Highlighter;
use crate::table::{RowCounts, SortDirection, TableState, apply_filter};
use crate::text::normalize_with;

/// Label used for exports covering every table
const ALL_TABLES_LABEL: &str = "all_tables";

/// Result of one search pass over every table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Normalized form of the query actually matched
    pub query_key: String,
    /// `(table, row)` of the first matching row in document order
    pub first_match: Option<(usize, usize)>,
    /// Row counts per table, by table index
    pub counts: Vec<RowCounts>,
}

/// Interactive state of every table in one document
#[derive(Debug)]
pub struct Session {
    document: NodeRef,
    tables: Vec<TableState>,
    highlighter: Highlighter,
    config: TableViewConfig,
    query_key: String,
}

impl Session {
    /// Parse `html` and bind every table matched by the configured selector.
    ///
    /// When the selector matches nothing, every `table` element is bound
    /// instead. Tables are indexed in document order.
    pub fn parse(html: &str, config: TableViewConfig) -> TableViewResult<Self> {
        let document = kuchiki::parse_html().one(html);
        Self::from_document(document, config)
    }

    /// Bind the tables of an already parsed document.
    pub fn from_document(document: NodeRef, config: TableViewConfig) -> TableViewResult<Self> {
        let highlighter = Highlighter::from_config(&config)?;

        let mut nodes: Vec<NodeRef> = document
            .select(config.table_selector())
            .map_err(|()| TableViewError::InvalidSelector(config.table_selector().to_string()))?
            .map(|table| table.as_node().clone())
            .collect();
        if nodes.is_empty() {
            nodes = document
                .select("table")
                .map_err(|()| TableViewError::InvalidSelector("table".to_string()))?
                .map(|table| table.as_node().clone())
                .collect();
        }

        let tables: Vec<TableState> = nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| TableState::bind(index, node))
            .collect();
        debug!(tables = tables.len(), "Bound interactive tables");

        Ok(Self {
            document,
            tables,
            highlighter,
            config,
            query_key: String::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TableViewConfig {
        &self.config
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn tables(&self) -> &[TableState] {
        &self.tables
    }

    pub fn table(&self, table: usize) -> TableViewResult<&TableState> {
        self.tables
            .get(table)
            .ok_or(TableViewError::TableNotFound(table))
    }

    fn table_mut(&mut self, table: usize) -> TableViewResult<&mut TableState> {
        self.tables
            .get_mut(table)
            .ok_or(TableViewError::TableNotFound(table))
    }

    /// Normalized key of the active query, empty when none
    #[must_use]
    pub fn query_key(&self) -> &str {
        &self.query_key
    }

    /// Serialize the live document, highlights and row state included.
    pub fn to_html(&self) -> TableViewResult<String> {
        outer_html(&self.document)
    }

    /// Filter and highlight every table for `query`.
    ///
    /// An empty (or punctuation-only) query shows every row and removes all
    /// highlights.
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        self.query_key = normalize_with(query, self.highlighter.mode());

        let mut first_match = None;
        for table in &mut self.tables {
            let hit = apply_filter(table, &self.query_key, &self.highlighter);
            if let (None, Some(row)) = (first_match, hit) {
                first_match = Some((table.index(), row));
            }
        }

        let counts = self.all_counts();
        debug!(
            query_key = %self.query_key,
            visible = counts.iter().map(|c| c.visible).sum::<usize>(),
            "Search applied"
        );
        SearchOutcome {
            query_key: self.query_key.clone(),
            first_match,
            counts,
        }
    }

    /// Advance the sort cycle of one column.
    ///
    /// Returning to unsorted rebuilds the rows from the Row Snapshot and
    /// re-applies the active query to them.
    pub fn sort_column(&mut self, table: usize, column: usize) -> TableViewResult<SortDirection> {
        let Self {
            tables,
            highlighter,
            query_key,
            ..
        } = self;
        let state = tables
            .get_mut(table)
            .ok_or(TableViewError::TableNotFound(table))?;

        let direction = state.sort_column(column)?;
        if direction == SortDirection::Unsorted && !query_key.is_empty() {
            apply_filter(state, query_key, highlighter);
        }
        debug!(table, column, ?direction, "Sorted column");
        Ok(direction)
    }

    /// Restore one table to its original row order and clear its sort.
    ///
    /// The active query is re-applied to the rebuilt rows.
    pub fn reset_table(&mut self, table: usize) -> TableViewResult<()> {
        let Self {
            tables,
            highlighter,
            query_key,
            ..
        } = self;
        let state = tables
            .get_mut(table)
            .ok_or(TableViewError::TableNotFound(table))?;

        state.reset();
        if !query_key.is_empty() {
            apply_filter(state, query_key, highlighter);
        }
        Ok(())
    }

    /// Clear the query, restore every table and expand them all.
    pub fn reset_all(&mut self) {
        self.query_key.clear();
        for table in &mut self.tables {
            table.reset();
            table.set_collapsed(false);
        }
    }

    pub fn row_counts(&self, table: usize) -> TableViewResult<RowCounts> {
        self.table(table).map(RowCounts::of)
    }

    fn all_counts(&self) -> Vec<RowCounts> {
        self.tables.iter().map(RowCounts::of).collect()
    }

    /// Flip one table between collapsed and expanded; returns the new state.
    pub fn toggle_table(&mut self, table: usize) -> TableViewResult<bool> {
        let state = self.table_mut(table)?;
        let collapsed = !state.is_collapsed();
        state.set_collapsed(collapsed);
        Ok(collapsed)
    }

    /// Collapse every table when any is expanded, otherwise expand them all.
    ///
    /// Returns `true` when the tables end up collapsed.
    pub fn toggle_all(&mut self) -> bool {
        let collapse = self.tables.iter().any(|t| !t.is_collapsed());
        for table in &mut self.tables {
            table.set_collapsed(collapse);
        }
        collapse
    }

    pub fn is_collapsed(&self, table: usize) -> TableViewResult<bool> {
        self.table(table).map(TableState::is_collapsed)
    }

    /// Sort codes per column: 0 unsorted, 1 ascending, 2 descending.
    pub fn sort_state(&self, table: usize) -> TableViewResult<Vec<u8>> {
        self.table(table).map(|t| t.sort_state().codes())
    }

    /// `aria-sort` value for one header cell.
    pub fn aria_sort(&self, table: usize, column: usize) -> TableViewResult<&'static str> {
        let state = self.table(table)?;
        if column >= state.column_count() {
            return Err(TableViewError::ColumnOutOfRange {
                table,
                column,
                columns: state.column_count(),
            });
        }
        Ok(state.sort_state().get(column).aria())
    }

    pub fn table_data(&self, table: usize) -> TableViewResult<TableData> {
        self.table(table).map(TableData::from_table)
    }

    /// Export one table in `format`, named by the configured template.
    pub fn export(&self, table: usize, format: ExportFormat) -> TableViewResult<Export> {
        let data = self.table_data(table)?;
        encode_table(&data, format, &self.naming())
    }

    /// Export every table into one document.
    pub fn export_all(&self, format: ExportFormat) -> TableViewResult<Export> {
        let data: Vec<TableData> = self.tables.iter().map(TableData::from_table).collect();
        encode_tables(&data, ALL_TABLES_LABEL, format, &self.naming())
    }

    fn naming(&self) -> ExportNaming<'_> {
        ExportNaming {
            template: self.config.export_name_template(),
            user: self.config.export_user(),
            date: Local::now().date_naive(),
        }
    }
}
