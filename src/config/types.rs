//! Core configuration types for interactive tables
//!
//! This module contains the main `TableViewConfig` struct that carries every
//! tunable used by the session, the highlighter, the exporters and the
//! background index worker.

use serde::{Deserialize, Serialize};

use crate::utils::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_EXPORT_NAME_TEMPLATE, DEFAULT_HIGHLIGHT_CLASS,
    DEFAULT_HIGHLIGHT_TAG, DEFAULT_SEARCH_CHUNK_SIZE, DEFAULT_SEARCH_LIMIT,
    DEFAULT_SNIPPET_WINDOW, DEFAULT_TABLE_SELECTOR,
};

/// Main configuration struct for a table session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableViewConfig {
    /// Quiet period in milliseconds before a typed query fires a search.
    pub(crate) debounce_ms: u64,

    /// Element name wrapping each highlighted range.
    pub(crate) highlight_tag: String,

    /// Class attribute placed on each highlight marker.
    pub(crate) highlight_class: String,

    /// CSS selector locating interactive tables in the host document.
    ///
    /// When it matches nothing, every `table` element is used instead.
    pub(crate) table_selector: String,

    /// Maximum characters in a background search snippet.
    pub(crate) snippet_window: usize,

    /// Rows scanned between cancellation checkpoints in the background worker.
    pub(crate) search_chunk_size: usize,

    /// Matching rows returned by a background search without an explicit limit.
    pub(crate) default_search_limit: usize,

    /// Export file name template (`{table}`, `{date}`, `{user}`).
    pub(crate) export_name_template: String,

    /// Value substituted for `{user}` in export file names.
    pub(crate) export_user: Option<String>,
}

impl Default for TableViewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            highlight_tag: DEFAULT_HIGHLIGHT_TAG.to_string(),
            highlight_class: DEFAULT_HIGHLIGHT_CLASS.to_string(),
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
            snippet_window: DEFAULT_SNIPPET_WINDOW,
            search_chunk_size: DEFAULT_SEARCH_CHUNK_SIZE,
            default_search_limit: DEFAULT_SEARCH_LIMIT,
            export_name_template: DEFAULT_EXPORT_NAME_TEMPLATE.to_string(),
            export_user: None,
        }
    }
}
