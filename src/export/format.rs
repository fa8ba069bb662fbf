use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{TableViewError, TableViewResult};

use super::data::TableData;
use super::encoders;
use super::file::export_file_name;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[serde(rename = "plain")]
    PlainText,
    Markdown,
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// File extension actually produced. XLSX degrades to `tsv`.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::PlainText => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "tsv",
            ExportFormat::Pdf => "html",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::PlainText => "text/plain; charset=utf-8",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => "text/tab-separated-values; charset=utf-8",
            ExportFormat::Pdf => "text/html; charset=utf-8",
        }
    }
}

/// Encoded export ready for the clipboard or disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
    /// Set when the requested format could not be produced as asked
    pub warning: Option<String>,
}

/// Naming inputs for an export file
#[derive(Debug, Clone)]
pub struct ExportNaming<'a> {
    pub template: &'a str,
    pub user: Option<&'a str>,
    pub date: NaiveDate,
}

/// Encode one table.
pub fn encode_table(
    table: &TableData,
    format: ExportFormat,
    naming: &ExportNaming<'_>,
) -> TableViewResult<Export> {
    encode(std::slice::from_ref(table), &table.title, format, naming)
}

/// Encode several tables into one export named after `label`.
///
/// Text formats concatenate the per-table output; JSON produces an object
/// keyed by table title.
pub fn encode_tables(
    tables: &[TableData],
    label: &str,
    format: ExportFormat,
    naming: &ExportNaming<'_>,
) -> TableViewResult<Export> {
    encode(tables, label, format, naming)
}

fn encode(
    tables: &[TableData],
    label: &str,
    format: ExportFormat,
    naming: &ExportNaming<'_>,
) -> TableViewResult<Export> {
    let mut warning = None;

    let content = match format {
        ExportFormat::PlainText => match tables {
            [single] => encoders::plain_text(single),
            _ => tables
                .iter()
                .map(|t| format!("{}\n", encoders::plain_text(t)))
                .collect(),
        },
        ExportFormat::Markdown => tables.iter().map(encoders::markdown).collect(),
        ExportFormat::Csv => join_sections(tables, encoders::csv),
        ExportFormat::Json => match tables {
            [single] => encoders::json(single)?,
            _ => json_by_title(tables)?,
        },
        ExportFormat::Xlsx => {
            let message = "No spreadsheet encoder available; exported tab-separated text instead";
            warn!(label, "{message}");
            warning = Some(message.to_string());
            join_sections(tables, encoders::tsv)
        }
        ExportFormat::Pdf => encoders::printable_html(tables),
    };

    Ok(Export {
        format,
        file_name: export_file_name(
            naming.template,
            label,
            naming.user,
            naming.date,
            format.extension(),
        ),
        mime_type: format.mime_type().to_string(),
        content,
        warning,
    })
}

/// Single table as-is; several tables each preceded by their title line and
/// separated by a blank line.
fn join_sections(tables: &[TableData], encode: fn(&TableData) -> String) -> String {
    match tables {
        [single] => encode(single),
        _ => tables
            .iter()
            .map(|t| format!("{}\n{}", t.title, encode(t)))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn json_by_title(tables: &[TableData]) -> TableViewResult<String> {
    let mut object = serde_json::Map::new();
    for (i, table) in tables.iter().enumerate() {
        let key = if object.contains_key(&table.title) {
            format!("{} ({})", table.title, i + 1)
        } else {
            table.title.clone()
        };
        object.insert(key, encoders::json_records(table));
    }
    serde_json::to_string_pretty(&object)
        .map_err(|e| TableViewError::Serialization(format!("Failed to encode JSON export: {e}")))
}
