//! Test utilities and HTML fixtures for the tableview test suite

use kodegen_tools_tableview::{Session, TableViewConfig};

/// Installs a tracing subscriber honoring `RUST_LOG`; safe to call repeatedly
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Wraps `body` in a minimal HTML document
#[allow(dead_code)]
pub fn create_test_html(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Tables</title></head>
<body>
{body}
</body>
</html>"#
    )
}

/// Two wrapped tables: a caf&eacute; list with inline markup and a price list
#[allow(dead_code)]
pub fn create_two_table_html() -> String {
    create_test_html(
        r#"<div class="table-wrapper">
  <h3>Places</h3>
  <div class="table-container">
    <table>
      <thead><tr><th>Name</th><th>City</th></tr></thead>
      <tbody>
        <tr><td>Caf<b>é</b> shop</td><td>Paris</td></tr>
        <tr><td>Tea room</td><td>London</td></tr>
        <tr><td>Bakery</td><td>Paris</td></tr>
      </tbody>
    </table>
  </div>
</div>
<div class="table-wrapper">
  <div class="table-container">
    <table>
      <thead><tr><th>Item</th><th>Price</th></tr></thead>
      <tbody>
        <tr><td>apple</td><td>10</td></tr>
        <tr><td>pear</td><td>2</td></tr>
        <tr><td>plum</td><td>apple</td></tr>
        <tr><td>fig</td><td>2</td></tr>
      </tbody>
    </table>
  </div>
</div>"#,
    )
}

/// A single bare table with no header row
#[allow(dead_code)]
pub fn create_headerless_html() -> String {
    create_test_html(
        r#"<table>
  <tr><td>alpha</td><td>1</td></tr>
  <tr><td>beta</td><td>2</td></tr>
</table>"#,
    )
}

/// Parses `html` into a session with the default configuration
#[allow(dead_code)]
pub fn session(html: &str) -> Session {
    Session::parse(html, TableViewConfig::default()).expect("fixture parses")
}

/// Body texts of one column in current row order
#[allow(dead_code)]
pub fn column(session: &Session, table: usize, column: usize) -> Vec<String> {
    session
        .table(table)
        .expect("table exists")
        .rows()
        .iter()
        .map(|row| row.text_at(column))
        .collect()
}

/// Visibility flags of one table in current row order
#[allow(dead_code)]
pub fn visibility(session: &Session, table: usize) -> Vec<bool> {
    session
        .table(table)
        .expect("table exists")
        .rows()
        .iter()
        .map(|row| row.is_visible())
        .collect()
}
