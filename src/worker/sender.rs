//! Caller-side handle to the index worker

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

use crate::errors::{TableViewError, TableViewResult};

use super::errors::WorkerError;
use super::stats::{WorkerStats, WorkerStatsSnapshot};
use super::types::{Envelope, TableRecord, WorkerRequest, WorkerResponse};

/// Sends requests to a running worker and receives its responses
pub struct WorkerHandle {
    pub(super) requests: mpsc::UnboundedSender<Envelope>,
    pub(super) responses: mpsc::UnboundedReceiver<WorkerResponse>,
    pub(super) latest_token: Arc<AtomicU64>,
    pub(super) stats: Arc<WorkerStats>,
}

impl std::fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerHandle")
            .field("latest_token", &self.latest_token.load(Ordering::Relaxed))
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

impl WorkerHandle {
    /// Send a typed request.
    ///
    /// Searches are stamped with a token before they leave, which makes every
    /// earlier search stale immediately. A caller-supplied `request_id` is
    /// used as the token and raises the counter to at least that value.
    /// Returns the token for searches.
    pub fn send(&self, mut request: WorkerRequest) -> TableViewResult<Option<u64>> {
        let token = match &mut request {
            WorkerRequest::Search { request_id, .. } => {
                let token = self.issue_token(*request_id);
                *request_id = Some(token);
                Some(token)
            }
            _ => None,
        };
        self.requests
            .send(Envelope::Request { request, token })
            .map_err(|_| TableViewError::WorkerDisconnected)?;
        Ok(token)
    }

    /// Send a raw JSON request.
    ///
    /// Input that does not parse is still delivered to the worker, which
    /// answers it with an `error` response.
    pub fn send_json(&self, json: &str) -> TableViewResult<Option<u64>> {
        match parse_request(json) {
            Ok(request) => self.send(request),
            Err(error) => {
                self.requests
                    .send(Envelope::Rejected(error))
                    .map_err(|_| TableViewError::WorkerDisconnected)?;
                Ok(None)
            }
        }
    }

    /// Start a search; returns its token.
    pub fn search(&self, query: impl Into<String>, limit: Option<usize>) -> TableViewResult<u64> {
        let token = self.send(WorkerRequest::Search {
            query: query.into(),
            limit,
            request_id: None,
        })?;
        token.ok_or(TableViewError::WorkerDisconnected)
    }

    pub fn index_tables(&self, tables: Vec<TableRecord>) -> TableViewResult<()> {
        self.send(WorkerRequest::Index {
            tables: Some(tables),
            html: None,
        })
        .map(drop)
    }

    pub fn index_html(&self, html: impl Into<String>) -> TableViewResult<()> {
        self.send(WorkerRequest::Index {
            tables: None,
            html: Some(html.into()),
        })
        .map(drop)
    }

    pub fn clear(&self) -> TableViewResult<()> {
        self.send(WorkerRequest::Clear).map(drop)
    }

    pub fn status(&self) -> TableViewResult<()> {
        self.send(WorkerRequest::Status).map(drop)
    }

    pub fn ping(&self) -> TableViewResult<()> {
        self.send(WorkerRequest::Ping).map(drop)
    }

    /// Next response; `None` once the worker has stopped.
    pub async fn recv(&mut self) -> Option<WorkerResponse> {
        self.responses.recv().await
    }

    /// Next response if one is already queued.
    pub fn try_recv(&mut self) -> Option<WorkerResponse> {
        self.responses.try_recv().ok()
    }

    /// Newest search token issued
    #[must_use]
    pub fn latest_token(&self) -> u64 {
        self.latest_token.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn stats(&self) -> WorkerStatsSnapshot {
        self.stats.snapshot()
    }

    fn issue_token(&self, requested: Option<u64>) -> u64 {
        match requested {
            Some(id) => {
                self.latest_token.fetch_max(id, Ordering::AcqRel);
                id
            }
            None => self.latest_token.fetch_add(1, Ordering::AcqRel) + 1,
        }
    }
}

/// Parse a JSON request, telling unknown kinds apart from malformed input.
pub(crate) fn parse_request(json: &str) -> Result<WorkerRequest, WorkerError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| WorkerError::MalformedRequest(e.to_string()))?;

    match value.get("type").and_then(serde_json::Value::as_str) {
        Some(kind) if !WorkerRequest::KINDS.iter().any(|known| *known == kind) => {
            return Err(WorkerError::UnknownRequest(kind.to_string()));
        }
        None => {
            return Err(WorkerError::MalformedRequest(
                "missing string field `type`".to_string(),
            ));
        }
        Some(_) => {}
    }

    serde_json::from_value(value).map_err(|e| WorkerError::MalformedRequest(e.to_string()))
}
