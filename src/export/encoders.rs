//! Text encoders for table exports

use serde_json::{Map, Value};

use crate::errors::{TableViewError, TableViewResult};

use super::data::TableData;

/// Title line, then every row tab-separated.
#[must_use]
pub fn plain_text(table: &TableData) -> String {
    let mut out = String::new();
    out.push_str(&table.title);
    out.push('\n');
    out.push_str(&tsv(table));
    out
}

/// Header (when present) and rows, tab-separated, one row per line.
#[must_use]
pub fn tsv(table: &TableData) -> String {
    table
        .all_rows()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bold title followed by a pipe table.
///
/// Without headers the first body row is used as the header row. Returns
/// an empty string for a table with no rows at all.
#[must_use]
pub fn markdown(table: &TableData) -> String {
    let mut rows = table.all_rows();
    let Some(head) = rows.next() else {
        return String::new();
    };

    let mut out = format!("**{}**\n", table.title);
    out.push_str(&markdown_row(head));
    out.push_str("| ");
    out.push_str(&vec!["---"; head.len()].join(" | "));
    out.push_str(" |\n");
    for row in rows {
        out.push_str(&markdown_row(row));
    }
    out
}

fn markdown_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| escape_markdown_cell(c)).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// Escape `|` and turn line breaks into `<br>`.
#[must_use]
pub fn escape_markdown_cell(text: &str) -> String {
    let escaped = text.replace('|', "\\|");
    if escaped.contains('\n') {
        escaped.replace("\r\n", "\n").replace('\n', "<br>")
    } else {
        escaped
    }
}

/// RFC 4180 CSV with CRLF record separators.
#[must_use]
pub fn csv(table: &TableData) -> String {
    let mut out = String::new();
    for row in table.all_rows() {
        let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Quote a field when it holds a quote, comma or line break.
#[must_use]
pub fn csv_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Array of objects keyed by column label, in column order.
///
/// Short rows yield empty strings for their missing cells.
pub fn json(table: &TableData) -> TableViewResult<String> {
    serde_json::to_string_pretty(&json_records(table))
        .map_err(|e| TableViewError::Serialization(format!("Failed to encode JSON export: {e}")))
}

/// Records behind [`json`], as a JSON array value.
#[must_use]
pub fn json_records(table: &TableData) -> Value {
    let labels = table.column_labels();
    let records: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            let mut record = Map::new();
            for (i, label) in labels.iter().enumerate() {
                let value = row.get(i).cloned().unwrap_or_default();
                record.insert(label.clone(), Value::String(value));
            }
            Value::Object(record)
        })
        .collect();
    Value::Array(records)
}

/// Standalone printable HTML document embedding the table.
#[must_use]
pub fn printable_html(tables: &[TableData]) -> String {
    let title = match tables {
        [single] => single.title.as_str(),
        _ => "Tables",
    };

    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{}</title>\n",
        html_escape::encode_text(title)
    ));
    out.push_str(
        "<style>body{font-family:sans-serif}table{border-collapse:collapse;margin-bottom:1.5em}\
         th,td{border:1px solid #999;padding:4px 8px;text-align:left}</style>\n",
    );
    out.push_str("</head>\n<body>\n");

    for table in tables {
        out.push_str(&format!("<h3>{}</h3>\n<table>\n", html_escape::encode_text(&table.title)));
        if !table.headers.is_empty() {
            out.push_str("<thead><tr>");
            for header in &table.headers {
                out.push_str(&format!("<th>{}</th>", html_escape::encode_text(header)));
            }
            out.push_str("</tr></thead>\n");
        }
        out.push_str("<tbody>\n");
        for row in &table.rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str(&format!("<td>{}</td>", html_escape::encode_text(cell)));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableData {
        TableData {
            title: "Prices".to_string(),
            headers: vec!["Item".to_string(), "Cost".to_string()],
            rows: vec![
                vec!["Tea".to_string(), "1,50".to_string()],
                vec!["A|B".to_string(), "say \"hi\"".to_string()],
            ],
        }
    }

    #[test]
    fn plain_text_starts_with_title() {
        assert_eq!(
            plain_text(&sample()),
            "Prices\nItem\tCost\nTea\t1,50\nA|B\tsay \"hi\""
        );
    }

    #[test]
    fn markdown_escapes_pipes_and_line_breaks() {
        let md = markdown(&sample());
        assert!(md.starts_with("**Prices**\n| Item | Cost |\n| --- | --- |\n"));
        assert!(md.contains("| A\\|B |"));
        assert_eq!(escape_markdown_cell("a\nb"), "a<br>b");
        assert_eq!(escape_markdown_cell("plain"), "plain");
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        assert_eq!(
            csv(&sample()),
            "Item,Cost\r\nTea,\"1,50\"\r\nA|B,\"say \"\"hi\"\"\"\r\n"
        );
    }

    #[test]
    fn json_falls_back_to_positional_keys() {
        let data = TableData {
            title: "t".to_string(),
            headers: Vec::new(),
            rows: vec![vec!["x".to_string(), "y".to_string()]],
        };
        let parsed: Value = serde_json::from_str(&json(&data).unwrap()).unwrap();
        assert_eq!(parsed[0]["Col1"], "x");
        assert_eq!(parsed[0]["Col2"], "y");
    }

    #[test]
    fn json_keeps_every_column_of_repeated_headers() {
        let data = TableData {
            title: "t".to_string(),
            headers: vec!["A".to_string(), "A".to_string(), "B".to_string()],
            rows: vec![vec!["1".to_string(), "2".to_string(), "3".to_string()]],
        };
        let parsed: Value = serde_json::from_str(&json(&data).unwrap()).unwrap();
        assert_eq!(parsed[0]["A"], "1");
        assert_eq!(parsed[0]["A (2)"], "2");
        assert_eq!(parsed[0]["B"], "3");
        assert_eq!(parsed[0].as_object().unwrap().len(), 3);
    }

    #[test]
    fn printable_html_escapes_cell_text() {
        let mut data = sample();
        data.rows[0][0] = "<b>".to_string();
        let html = printable_html(&[data]);
        assert!(html.contains("<td>&lt;b&gt;</td>"));
        assert!(html.contains("<title>Prices</title>"));
    }
}
