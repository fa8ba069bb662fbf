//! Live table model
//!
//! Binds one `<table>` element of the host document to its rows, cells,
//! cell baselines, Row Snapshot and sort state.

use kuchiki::NodeRef;
use tracing::debug;

use crate::dom::node_util::{
    closest_with_class, element_children, has_class, inner_html, is_element, move_to_end,
    set_class, set_flag_attribute,
};
use crate::errors::{TableViewError, TableViewResult};
use crate::highlight::CellSnapshot;
use crate::text::{NormalizeMode, normalize_with};
use crate::utils::collapse_whitespace;

use super::row_snapshot::RowSnapshot;
use super::sort::{SortDirection, SortState, sort_by_text};

/// Class of the element enclosing a table, its title and its controls
pub const WRAPPER_CLASS: &str = "table-wrapper";

/// Class toggled on the wrapper of a collapsed table
pub const COLLAPSED_CLASS: &str = "table-collapsed";

/// One `<td>`/`<th>` with its highlight baseline
#[derive(Debug, Clone)]
pub struct Cell {
    node: NodeRef,
    snapshot: CellSnapshot,
}

impl Cell {
    fn new(node: NodeRef) -> Self {
        let mut snapshot = CellSnapshot::default();
        snapshot.capture(&node);
        Self { node, snapshot }
    }

    #[must_use]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Trimmed text content
    #[must_use]
    pub fn text(&self) -> String {
        self.node.text_contents().trim().to_string()
    }

    /// Normalized search key of the full cell text, whitespace between
    /// inline elements included
    #[must_use]
    pub fn key(&self, mode: NormalizeMode) -> String {
        normalize_with(&self.node.text_contents(), mode)
    }

    /// Current markup, including any highlight markers
    pub fn markup(&self) -> TableViewResult<String> {
        inner_html(&self.node)
    }

    /// Markup recorded before the first highlight
    pub fn baseline_markup(&self) -> TableViewResult<Option<String>> {
        self.snapshot.markup()
    }

    /// Put the baseline back, dropping every highlight marker.
    pub fn restore(&self) -> bool {
        self.snapshot.restore(&self.node)
    }
}

/// One body row
#[derive(Debug, Clone)]
pub struct Row {
    node: NodeRef,
    cells: Vec<Cell>,
    visible: bool,
}

impl Row {
    fn new(node: NodeRef) -> Self {
        let cells = node
            .children()
            .filter(|child| is_element(child, "td") || is_element(child, "th"))
            .map(Cell::new)
            .collect();
        let visible = node
            .as_element()
            .is_none_or(|elem| !elem.attributes.borrow().contains("hidden"));
        Self {
            node,
            cells,
            visible,
        }
    }

    #[must_use]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        set_flag_attribute(&self.node, "hidden", !visible);
    }

    /// Trimmed text of the cell at `column`, empty when the row is short.
    #[must_use]
    pub fn text_at(&self, column: usize) -> String {
        self.cells.get(column).map(Cell::text).unwrap_or_default()
    }

    /// Trimmed text of every cell
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(Cell::text).collect()
    }

    /// Restore every cell to its baseline.
    pub(crate) fn restore(&self) {
        for (column, cell) in self.cells.iter().enumerate() {
            if !cell.restore() {
                debug!(column, "Cell has no baseline to restore");
            }
        }
    }
}

/// Live state of one interactive table
#[derive(Debug, Clone)]
pub struct TableState {
    index: usize,
    node: NodeRef,
    body: NodeRef,
    wrapper: Option<NodeRef>,
    title: String,
    headers: Vec<String>,
    columns: usize,
    rows: Vec<Row>,
    snapshot: RowSnapshot,
    sort: SortState,
    collapsed: bool,
}

impl TableState {
    /// Bind the `<table>` element at document position `index`.
    pub(crate) fn bind(index: usize, node: NodeRef) -> Self {
        let body = element_children(&node, "tbody")
            .into_iter()
            .next()
            .unwrap_or_else(|| node.clone());
        let row_nodes = element_children(&body, "tr");
        let snapshot = RowSnapshot::capture(&row_nodes);
        let rows: Vec<Row> = row_nodes.into_iter().map(Row::new).collect();

        let headers = header_labels(&node);
        let widest = rows.iter().map(|row| row.cells.len()).max().unwrap_or(0);
        let columns = headers.len().max(widest);

        let wrapper = closest_with_class(&node, WRAPPER_CLASS);
        let collapsed = wrapper
            .as_ref()
            .is_some_and(|w| has_class(w, COLLAPSED_CLASS));
        let title = table_title(index, &node, wrapper.as_ref(), &headers);

        let table = Self {
            index,
            node,
            body,
            wrapper,
            title,
            headers,
            columns,
            rows,
            snapshot,
            sort: SortState::new(columns),
            collapsed,
        };
        table.sync_sort_attributes();
        table
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Header labels, empty when the table has no `<thead>`
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    #[must_use]
    pub fn snapshot(&self) -> &RowSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub(crate) fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
        if let Some(wrapper) = &self.wrapper {
            set_class(wrapper, COLLAPSED_CLASS, collapsed);
        }
    }

    /// Advance the sort cycle of `column` and reorder the body.
    ///
    /// Ascending and descending reorder the current rows in place, keeping
    /// their visibility and highlights. Returning to unsorted rebuilds the
    /// body from the Row Snapshot; the rebuilt rows are all visible and
    /// unhighlighted.
    pub(crate) fn sort_column(&mut self, column: usize) -> TableViewResult<SortDirection> {
        let direction = self
            .sort
            .advance(column)
            .ok_or(TableViewError::ColumnOutOfRange {
                table: self.index,
                column,
                columns: self.columns,
            })?;

        match direction {
            SortDirection::Unsorted => self.rebuild_rows(),
            _ => {
                sort_by_text(&mut self.rows, direction, |row| row.text_at(column));
                for row in &self.rows {
                    move_to_end(&self.body, &row.node);
                }
            }
        }

        self.sync_sort_attributes();
        Ok(direction)
    }

    /// Rebuild the body from the Row Snapshot and clear the sort state.
    pub(crate) fn reset(&mut self) {
        self.sort.clear();
        self.rebuild_rows();
        self.sync_sort_attributes();
    }

    fn rebuild_rows(&mut self) {
        for row in self.rows.drain(..) {
            row.node.detach();
        }
        for node in self.snapshot.materialize() {
            self.body.append(node.clone());
            let mut row = Row::new(node);
            row.set_visible(true);
            self.rows.push(row);
        }
    }

    /// Mirror the sort state onto `aria-sort` of the header cells.
    fn sync_sort_attributes(&self) {
        let Some(header_row) = header_row(&self.node) else {
            return;
        };
        let header_cells = header_row
            .children()
            .filter(|child| is_element(child, "th") || is_element(child, "td"));
        for (column, cell) in header_cells.enumerate() {
            if let Some(elem) = cell.as_element() {
                elem.attributes
                    .borrow_mut()
                    .insert("aria-sort", self.sort.get(column).aria().to_string());
            }
        }
    }
}

fn header_row(table: &NodeRef) -> Option<NodeRef> {
    let thead = element_children(table, "thead").into_iter().next()?;
    element_children(&thead, "tr").into_iter().next()
}

fn header_labels(table: &NodeRef) -> Vec<String> {
    header_row(table)
        .map(|row| {
            row.children()
                .filter(|child| is_element(child, "th") || is_element(child, "td"))
                .map(|cell| collapse_whitespace(&cell.text_contents()))
                .collect()
        })
        .unwrap_or_default()
}

/// Wrapper `<h3>`, then `<caption>`, then first header, then `Table N`.
fn table_title(
    index: usize,
    table: &NodeRef,
    wrapper: Option<&NodeRef>,
    headers: &[String],
) -> String {
    let heading = wrapper
        .and_then(|w| w.select_first("h3").ok())
        .map(|h3| collapse_whitespace(&h3.as_node().text_contents()));
    let caption = element_children(table, "caption")
        .into_iter()
        .next()
        .map(|c| collapse_whitespace(&c.text_contents()));

    [heading, caption, headers.first().cloned()]
        .into_iter()
        .flatten()
        .find(|title| !title.is_empty())
        .unwrap_or_else(|| format!("Table {}", index + 1))
}
