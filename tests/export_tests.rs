//! Exports built from live tables, file writing and clipboard fallback

use anyhow::anyhow;
use kodegen_tools_tableview::export::{
    Clipboard, CopyOutcome, Export, ExportFormat, Severity, copy_with_fallback, save_export,
};
use kodegen_tools_tableview::{Session, TableViewConfig};
use tempfile::TempDir;

mod common;

fn session_with_template(template: &str) -> Session {
    let config = TableViewConfig::builder()
        .export_name_template(template)
        .export_user(Some("ana".to_string()))
        .build()
        .unwrap();
    Session::parse(&common::create_two_table_html(), config).unwrap()
}

#[test]
fn test_csv_export_of_one_table() {
    let session = session_with_template("{table}");

    let export = session.export(1, ExportFormat::Csv).unwrap();

    assert_eq!(export.file_name, "Item.csv");
    assert_eq!(export.mime_type, "text/csv; charset=utf-8");
    assert_eq!(
        export.content,
        "Item,Price\r\napple,10\r\npear,2\r\nplum,apple\r\nfig,2\r\n"
    );
    assert!(export.warning.is_none());
}

#[test]
fn test_export_follows_current_order_and_keeps_hidden_rows() {
    let mut session = session_with_template("{table}");
    session.search("apple");
    session.sort_column(1, 0).unwrap();

    let export = session.export(1, ExportFormat::PlainText).unwrap();

    assert_eq!(
        export.content,
        "Item\nItem\tPrice\napple\t10\nfig\t2\npear\t2\nplum\tapple"
    );
}

#[test]
fn test_export_uses_text_not_highlight_markup() {
    let mut session = session_with_template("{table}");
    session.search("cafe");

    let export = session.export(0, ExportFormat::Markdown).unwrap();

    assert!(export.content.starts_with("**Places**\n| Name | City |\n| --- | --- |\n"));
    assert!(export.content.contains("| Café shop | Paris |"));
    assert!(!export.content.contains("mark"));
}

#[test]
fn test_json_export_of_headerless_table_uses_positional_keys() {
    let session = Session::parse(&common::create_headerless_html(), TableViewConfig::default())
        .unwrap();

    let export = session.export(0, ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&export.content).unwrap();

    assert_eq!(value[0]["Col1"], "alpha");
    assert_eq!(value[1]["Col2"], "2");
}

#[test]
fn test_json_export_of_all_tables_is_keyed_by_title() {
    let session = session_with_template("{table}-{user}");

    let export = session.export_all(ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&export.content).unwrap();

    assert_eq!(export.file_name, "all_tables-ana.json");
    assert_eq!(value["Places"][1]["City"], "London");
    assert_eq!(value["Item"][3]["Item"], "fig");
}

#[test]
fn test_xlsx_falls_back_to_tsv_with_warning() {
    let session = session_with_template("{table}");

    let export = session.export(1, ExportFormat::Xlsx).unwrap();

    assert_eq!(export.file_name, "Item.tsv");
    assert!(export.warning.is_some());
    assert!(export.content.starts_with("Item\tPrice\napple\t10"));
}

#[test]
fn test_pdf_becomes_printable_html() {
    let session = session_with_template("{table}");

    let export = session.export(0, ExportFormat::Pdf).unwrap();

    assert_eq!(export.file_name, "Places.html");
    assert!(export.content.starts_with("<!DOCTYPE html>"));
    assert!(export.content.contains("<title>Places</title>"));
    assert!(export.content.contains("Café shop"));
}

#[test]
fn test_default_template_carries_date() {
    let session = common::session(&common::create_two_table_html());

    let export = session.export(0, ExportFormat::Markdown).unwrap();

    let date = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(export.file_name, format!("Places_{date}.md"));
}

#[tokio::test]
async fn test_save_export_writes_file() {
    let dir = TempDir::new().unwrap();
    let session = session_with_template("{table}");
    let export = session.export(1, ExportFormat::Csv).unwrap();

    let path = save_export(dir.path(), &export).await.unwrap();

    assert_eq!(path, dir.path().join("Item.csv"));
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), export.content);
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_save_export_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let export = Export {
        format: ExportFormat::PlainText,
        file_name: "t.txt".to_string(),
        mime_type: ExportFormat::PlainText.mime_type().to_string(),
        content: "x".to_string(),
        warning: None,
    };

    let path = save_export(&nested, &export).await.unwrap();

    assert!(path.exists());
}

struct Recording(Vec<String>);

impl Clipboard for Recording {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.0.push(text.to_string());
        Ok(())
    }
}

struct Denied;

impl Clipboard for Denied {
    fn write_text(&mut self, _text: &str) -> anyhow::Result<()> {
        Err(anyhow!("permission denied"))
    }
}

#[test]
fn test_copy_goes_to_clipboard_or_falls_back() {
    let session = session_with_template("{table}");
    let text = session.export(1, ExportFormat::Markdown).unwrap().content;

    let mut clipboard = Recording(Vec::new());
    let (outcome, notice) = copy_with_fallback(Some(&mut clipboard), &text, "table as Markdown");
    assert_eq!(outcome, CopyOutcome::Copied);
    assert_eq!(notice.severity, Severity::Info);
    assert_eq!(clipboard.0, vec![text.clone()]);

    let (outcome, notice) = copy_with_fallback(Some(&mut Denied), &text, "table as Markdown");
    assert_eq!(outcome, CopyOutcome::Manual(text.clone()));
    assert_eq!(notice.severity, Severity::Warning);

    let (outcome, _) = copy_with_fallback::<Denied>(None, &text, "table as Markdown");
    assert_eq!(outcome, CopyOutcome::Manual(text));
}
