//! Worker message types
//!
//! Requests and responses are tagged by a `type` field and use camelCase
//! field names on the wire:
//!
//! ```json
//! {"type":"search","query":"cafe","limit":10,"requestId":7}
//! {"type":"searchResults","query":"cafe","results":[...],"requestId":7}
//! ```

use serde::{Deserialize, Serialize};

/// One table handed to the worker already parsed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    /// Caller's identifier; `table-N` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Request kinds accepted by the worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WorkerRequest {
    /// Replace the index with `tables`, or with the tables found in `html`
    Index {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tables: Option<Vec<TableRecord>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        html: Option<String>,
    },
    Search {
        query: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
    },
    Clear,
    Status,
    Ping,
}

impl WorkerRequest {
    /// Every `type` tag the worker understands
    pub const KINDS: [&'static str; 5] = ["index", "search", "clear", "status", "ping"];
}

/// Matched row text around the first occurrence of the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub row_index: usize,
    pub snippet: String,
}

/// Matches within one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMatches {
    pub table_id: String,
    pub table_index: usize,
    pub matches: Vec<usize>,
    pub snippets: Vec<Snippet>,
}

/// Response kinds produced by the worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WorkerResponse {
    Status {
        ready: bool,
        tables: usize,
        rows: usize,
    },
    SearchResults {
        query: String,
        results: Vec<TableMatches>,
        request_id: u64,
    },
    SearchCanceled {
        query: String,
        request_id: u64,
    },
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
    },
    Pong,
}

impl WorkerResponse {
    /// Request id carried by search-related responses
    #[must_use]
    pub fn request_id(&self) -> Option<u64> {
        match self {
            WorkerResponse::SearchResults { request_id, .. }
            | WorkerResponse::SearchCanceled { request_id, .. } => Some(*request_id),
            WorkerResponse::Error { request_id, .. } => *request_id,
            _ => None,
        }
    }
}

/// Request plus the search token assigned when it was sent
#[derive(Debug)]
pub(crate) enum Envelope {
    Request {
        request: WorkerRequest,
        token: Option<u64>,
    },
    /// Raw input that never became a request
    Rejected(super::errors::WorkerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_uses_camel_case_fields() {
        let request: WorkerRequest =
            serde_json::from_str(r#"{"type":"search","query":"x","requestId":4}"#).unwrap();
        assert_eq!(
            request,
            WorkerRequest::Search {
                query: "x".to_string(),
                limit: None,
                request_id: Some(4),
            }
        );
    }

    #[test]
    fn results_serialize_with_wire_names() {
        let response = WorkerResponse::SearchResults {
            query: "q".to_string(),
            results: vec![TableMatches {
                table_id: "t".to_string(),
                table_index: 0,
                matches: vec![2],
                snippets: vec![Snippet {
                    row_index: 2,
                    snippet: "a | q".to_string(),
                }],
            }],
            request_id: 9,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "searchResults");
        assert_eq!(json["requestId"], 9);
        assert_eq!(json["results"][0]["tableIndex"], 0);
        assert_eq!(json["results"][0]["snippets"][0]["rowIndex"], 2);
    }
}
