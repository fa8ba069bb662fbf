//! Background table index worker
//!
//! Keeps a flattened index of row texts off the interactive path and
//! answers substring searches over it. Every search is tagged with a
//! monotonically increasing token; a search overtaken by a newer one
//! reports cancellation and never delivers results.
//!
//! - `types` - request/response messages and table records
//! - `index` - flattened row index and snippets
//! - `extract` - table extraction from raw HTML
//! - `sender` - caller-side handle and token issuing
//! - `service` - the worker loop

mod errors;
mod extract;
mod index;
mod sender;
mod service;
mod stats;
mod types;

pub use errors::WorkerError;
pub use extract::{extract_tables, extract_with_parser, extract_with_regex};
pub use index::{IndexedRow, IndexedTable, RowIndex, WORKER_MODE};
pub use sender::WorkerHandle;
pub use service::TableIndexWorker;
pub use stats::{WorkerStats, WorkerStatsSnapshot};
pub use types::{Snippet, TableMatches, TableRecord, WorkerRequest, WorkerResponse};
