pub mod config;
pub mod errors;
pub mod export;
pub mod highlight;
pub mod session;
pub mod table;
pub mod text;
pub mod utils;
pub mod worker;

mod dom;

pub use config::{TableViewConfig, TableViewConfigBuilder};
pub use errors::{TableViewError, TableViewResult};
pub use export::{Export, ExportFormat, TableData};
pub use highlight::{HighlightTarget, Highlighter};
pub use session::{Debouncer, SearchOutcome, Session};
pub use table::{RowCounts, SortDirection};
pub use text::{NormalizeMode, collation_key, normalize};
pub use worker::{TableIndexWorker, WorkerHandle, WorkerRequest, WorkerResponse};

/// Parse `html` with the default configuration and run one search over it.
///
/// Returns the outcome and the document serialized afterwards.
pub fn search_document(html: &str, query: &str) -> TableViewResult<(SearchOutcome, String)> {
    let mut session = Session::parse(html, TableViewConfig::default())?;
    let outcome = session.search(query);
    let rendered = session.to_html()?;
    Ok((outcome, rendered))
}
