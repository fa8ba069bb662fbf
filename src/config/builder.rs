//! Builder for `TableViewConfig`
//!
//! Every field has a default, so the builder carries no type states; all
//! validation happens once in [`TableViewConfigBuilder::build`].

use crate::errors::{TableViewError, TableViewResult};
use crate::utils::{MAX_DEBOUNCE_MS, MIN_SNIPPET_WINDOW};

use super::types::TableViewConfig;

/// Fluent builder for [`TableViewConfig`]
#[derive(Debug, Clone, Default)]
pub struct TableViewConfigBuilder {
    pub(crate) config: TableViewConfig,
}

impl TableViewConfig {
    /// Create a builder for configuring a `TableViewConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> TableViewConfigBuilder {
        TableViewConfigBuilder::default()
    }

    /// Parse a configuration from JSON, filling missing fields with defaults
    ///
    /// The result goes through the same validation as the builder.
    pub fn from_json(json: &str) -> TableViewResult<Self> {
        let config: TableViewConfig = serde_json::from_str(json)
            .map_err(|e| TableViewError::InvalidConfig(e.to_string()))?;
        TableViewConfigBuilder { config }.build()
    }
}

impl TableViewConfigBuilder {
    /// Validate and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns [`TableViewError::InvalidConfig`] when the debounce window is
    /// above its bound, the highlight tag is not a plain element name, the
    /// table selector is empty, the snippet window is too small or the
    /// search chunk size or default limit is zero.
    pub fn build(self) -> TableViewResult<TableViewConfig> {
        let config = self.config;

        if config.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(TableViewError::InvalidConfig(format!(
                "debounce_ms {} exceeds {MAX_DEBOUNCE_MS}",
                config.debounce_ms
            )));
        }

        if config.highlight_tag.is_empty()
            || !config
                .highlight_tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            || !config.highlight_tag.starts_with(|c: char| c.is_ascii_alphabetic())
        {
            return Err(TableViewError::InvalidConfig(format!(
                "highlight_tag '{}' is not a plain element name",
                config.highlight_tag
            )));
        }

        if config.highlight_class.contains('"') {
            return Err(TableViewError::InvalidConfig(
                "highlight_class must not contain quotes".to_string(),
            ));
        }

        if config.table_selector.trim().is_empty() {
            return Err(TableViewError::InvalidConfig(
                "table_selector must not be empty".to_string(),
            ));
        }

        if config.snippet_window < MIN_SNIPPET_WINDOW {
            return Err(TableViewError::InvalidConfig(format!(
                "snippet_window {} is below {MIN_SNIPPET_WINDOW}",
                config.snippet_window
            )));
        }

        if config.search_chunk_size == 0 {
            return Err(TableViewError::InvalidConfig(
                "search_chunk_size must be at least 1".to_string(),
            ));
        }

        if config.default_search_limit == 0 {
            return Err(TableViewError::InvalidConfig(
                "default_search_limit must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}
