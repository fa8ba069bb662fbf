//! Table export: plain text, Markdown, CSV, JSON, XLSX fallback and
//! printable HTML, plus clipboard and file delivery

mod clipboard;
mod data;
mod encoders;
mod file;
mod format;

pub use clipboard::{Clipboard, CopyOutcome, Notice, Severity, copy_with_fallback};
pub use data::TableData;
pub use encoders::{
    csv, csv_field, escape_markdown_cell, json, json_records, markdown, plain_text,
    printable_html, tsv,
};
pub use file::{export_file_name, save_export};
pub use format::{Export, ExportFormat, ExportNaming, encode_table, encode_tables};
