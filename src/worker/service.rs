//! Background worker loop
//!
//! Runs on its own tokio task and answers one response per request, in
//! request order. A search checks its token against the newest one issued
//! before and after every chunk of rows and yields to the runtime between
//! chunks; once superseded it stops and reports `searchCanceled` instead of
//! results.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::config::TableViewConfig;
use crate::text::normalize_with;

use super::errors::WorkerError;
use super::extract::extract_tables;
use super::index::{RowIndex, WORKER_MODE};
use super::sender::WorkerHandle;
use super::stats::WorkerStats;
use super::types::{
    Envelope, Snippet, TableMatches, TableRecord, WorkerRequest, WorkerResponse,
};

/// Flattened row index served from a background task
pub struct TableIndexWorker {
    index: RowIndex,
    latest_token: Arc<AtomicU64>,
    stats: Arc<WorkerStats>,
    chunk_size: usize,
    default_limit: usize,
    snippet_window: usize,
}

impl TableIndexWorker {
    /// Start the worker on the current tokio runtime.
    #[must_use]
    pub fn spawn(config: &TableViewConfig) -> WorkerHandle {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let latest_token = Arc::new(AtomicU64::new(0));
        let stats = Arc::new(WorkerStats::default());

        let worker = TableIndexWorker {
            index: RowIndex::default(),
            latest_token: latest_token.clone(),
            stats: stats.clone(),
            chunk_size: config.search_chunk_size().max(1),
            default_limit: config.default_search_limit(),
            snippet_window: config.snippet_window(),
        };

        tokio::spawn(async move {
            worker.run(request_rx, response_tx).await;
        });

        WorkerHandle {
            requests: request_tx,
            responses: response_rx,
            latest_token,
            stats,
        }
    }

    async fn run(
        mut self,
        mut requests: mpsc::UnboundedReceiver<Envelope>,
        responses: mpsc::UnboundedSender<WorkerResponse>,
    ) {
        while let Some(envelope) = requests.recv().await {
            self.stats.requests.fetch_add(1, Ordering::Relaxed);

            let response = match envelope {
                Envelope::Request { request, token } => self.handle(request, token).await,
                Envelope::Rejected(error) => self.error_response(&error, None),
            };

            if responses.send(response).is_err() {
                debug!("Worker handle dropped, stopping");
                break;
            }
        }
        debug!("Table index worker stopped");
    }

    async fn handle(&mut self, request: WorkerRequest, token: Option<u64>) -> WorkerResponse {
        match request {
            WorkerRequest::Index { tables, html } => match self.rebuild_index(tables, html) {
                Ok(()) => self.status(),
                Err(error) => self.error_response(&error, None),
            },
            WorkerRequest::Search {
                query,
                limit,
                request_id,
            } => {
                // Searches sent through the handle always carry a token.
                let token = token.or(request_id).unwrap_or(0);
                self.search(query, limit, token).await
            }
            WorkerRequest::Clear => {
                self.index.clear();
                self.status()
            }
            WorkerRequest::Status => self.status(),
            WorkerRequest::Ping => WorkerResponse::Pong,
        }
    }

    fn rebuild_index(
        &mut self,
        tables: Option<Vec<TableRecord>>,
        html: Option<String>,
    ) -> Result<(), WorkerError> {
        let records = match (tables, html) {
            (Some(tables), _) => tables,
            (None, Some(html)) => {
                let records = extract_tables(&html);
                if records.is_empty() && html.to_ascii_lowercase().contains("<table") {
                    return Err(WorkerError::Extraction(
                        "markup contains <table but no complete table".to_string(),
                    ));
                }
                if records.is_empty() {
                    debug!("No tables found in HTML index request");
                }
                records
            }
            (None, None) => return Err(WorkerError::EmptyIndexRequest),
        };
        self.index.replace(records);
        debug!(
            tables = self.index.table_count(),
            rows = self.index.row_count(),
            "Index rebuilt"
        );
        Ok(())
    }

    fn status(&self) -> WorkerResponse {
        WorkerResponse::Status {
            ready: true,
            tables: self.index.table_count(),
            rows: self.index.row_count(),
        }
    }

    fn is_superseded(&self, token: u64) -> bool {
        self.latest_token.load(Ordering::Acquire) != token
    }

    fn canceled(&self, query: String, token: u64) -> WorkerResponse {
        self.stats.searches_canceled.fetch_add(1, Ordering::Relaxed);
        debug!(token, "Search superseded, abandoning");
        WorkerResponse::SearchCanceled {
            query,
            request_id: token,
        }
    }

    async fn search(&self, query: String, limit: Option<usize>, token: u64) -> WorkerResponse {
        let key = normalize_with(&query, WORKER_MODE);
        let limit = limit.unwrap_or(self.default_limit);
        let mut results: Vec<TableMatches> = Vec::new();

        if !key.is_empty() && limit > 0 {
            let positions = self.index.positions();
            let mut found = 0;

            for chunk in positions.chunks(self.chunk_size) {
                if self.is_superseded(token) {
                    return self.canceled(query, token);
                }

                for &(table, row) in chunk {
                    let Some(indexed) = self.index.row(table, row) else {
                        continue;
                    };
                    if !indexed.key.contains(&key) {
                        continue;
                    }
                    let snippet = indexed.snippet(&key, self.snippet_window);
                    self.record_match(&mut results, table, row, snippet);
                    found += 1;
                    if found >= limit {
                        break;
                    }
                }

                if self.is_superseded(token) {
                    return self.canceled(query, token);
                }
                if found >= limit {
                    break;
                }
                trace!(token, scanned = chunk.len(), "Search chunk done");
                tokio::task::yield_now().await;
            }
        }

        if self.is_superseded(token) {
            return self.canceled(query, token);
        }
        self.stats.searches_completed.fetch_add(1, Ordering::Relaxed);
        WorkerResponse::SearchResults {
            query,
            results,
            request_id: token,
        }
    }

    fn record_match(
        &self,
        results: &mut Vec<TableMatches>,
        table: usize,
        row: usize,
        snippet: String,
    ) {
        let needs_entry = results.last().is_none_or(|last| last.table_index != table);
        if needs_entry {
            let table_id = self
                .index
                .tables()
                .get(table)
                .map(|t| t.id.clone())
                .unwrap_or_default();
            results.push(TableMatches {
                table_id,
                table_index: table,
                matches: Vec::new(),
                snippets: Vec::new(),
            });
        }
        if let Some(entry) = results.last_mut() {
            entry.matches.push(row);
            entry.snippets.push(Snippet {
                row_index: row,
                snippet,
            });
        }
    }

    fn error_response(&self, error: &WorkerError, request_id: Option<u64>) -> WorkerResponse {
        self.stats.errors.fetch_add(1, Ordering::Relaxed);
        warn!(%error, "Worker request failed");
        WorkerResponse::Error {
            message: error.to_string(),
            request_id,
        }
    }
}
