//! Table extraction from raw HTML
//!
//! `scraper` does the work. Markup it cannot make sense of (a fragment with
//! unbalanced tags, or a table inside a context the parser drops) goes
//! through a regex extractor that only understands `table`/`tr`/`td`/`th`
//! and decodes entities itself.

use std::sync::LazyLock;

use htmlentity::entity::{ICodedDataTrait, decode};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::utils::collapse_whitespace;

use super::types::TableRecord;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
});

static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("BUG: hardcoded selector 'tr' is statically valid")
});

static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td, th").expect("BUG: hardcoded selector 'td, th' is statically valid")
});

static TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<table\b[^>]*>(.*?)</table\s*>")
        .expect("BUG: hardcoded table regex is statically valid")
});

static ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<tr\b[^>]*>(.*?)(?:</tr\s*>|$)")
        .expect("BUG: hardcoded row regex is statically valid")
});

static CELL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(t[hd])\b[^>]*>(.*?)</t[hd]\s*>")
        .expect("BUG: hardcoded cell regex is statically valid")
});

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[^>]*>").expect("BUG: hardcoded tag regex is statically valid")
});

/// Extract every table in `html`, trying the DOM parser first.
#[must_use]
pub fn extract_tables(html: &str) -> Vec<TableRecord> {
    let tables = extract_with_parser(html);
    if tables.is_empty() && html.to_ascii_lowercase().contains("<table") {
        debug!("Parser found no tables, using regex extractor");
        return extract_with_regex(html);
    }
    tables
}

/// DOM-based extraction: `thead` rows become headers.
#[must_use]
pub fn extract_with_parser(html: &str) -> Vec<TableRecord> {
    let document = Html::parse_document(html);
    document
        .select(&TABLE_SELECTOR)
        .map(|table| {
            let mut record = TableRecord::default();
            for row in table.select(&TR_SELECTOR) {
                if !belongs_to(row, table) {
                    continue;
                }
                let cells: Vec<String> = row
                    .select(&CELL_SELECTOR)
                    .filter(|cell| cell.parent().and_then(ElementRef::wrap) == Some(row))
                    .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
                    .collect();
                if in_thead(row) && record.headers.is_empty() {
                    record.headers = cells;
                } else if !in_thead(row) {
                    record.rows.push(cells);
                }
            }
            record
        })
        .collect()
}

/// Whether `row`'s nearest enclosing table is `table` (skips nested tables).
fn belongs_to(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
        .is_some_and(|el| el == table)
}

fn in_thead(row: ElementRef<'_>) -> bool {
    row.parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|parent| parent.value().name() == "thead")
}

/// Regex-based extraction for markup the parser rejects.
///
/// A leading row made only of `th` cells becomes the header row.
#[must_use]
pub fn extract_with_regex(html: &str) -> Vec<TableRecord> {
    TABLE_REGEX
        .captures_iter(html)
        .filter_map(|table| table.get(1))
        .map(|body| {
            let mut record = TableRecord::default();
            for row in ROW_REGEX.captures_iter(body.as_str()) {
                let Some(inner) = row.get(1) else {
                    continue;
                };
                let mut all_header = true;
                let cells: Vec<String> = CELL_REGEX
                    .captures_iter(inner.as_str())
                    .map(|cell| {
                        all_header &= cell[1].eq_ignore_ascii_case("th");
                        cell_text(&cell[2])
                    })
                    .collect();
                if cells.is_empty() {
                    continue;
                }
                if all_header && record.headers.is_empty() && record.rows.is_empty() {
                    record.headers = cells;
                } else {
                    record.rows.push(cells);
                }
            }
            record
        })
        .collect()
}

/// Strip tags, decode entities, collapse whitespace.
fn cell_text(fragment: &str) -> String {
    let stripped = TAG_REGEX.replace_all(fragment, " ");
    let decoded = match decode(stripped.as_bytes()).to_string() {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Failed to decode HTML entities in table cell: {e}. Using undecoded text.");
            stripped.into_owned()
        }
    };
    collapse_whitespace(&decoded)
}
