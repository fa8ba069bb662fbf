//! Getter methods for `TableViewConfig`

use std::time::Duration;

use super::types::TableViewConfig;

impl TableViewConfig {
    #[must_use]
    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    /// Debounce window as a [`Duration`]
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn highlight_tag(&self) -> &str {
        &self.highlight_tag
    }

    #[must_use]
    pub fn highlight_class(&self) -> &str {
        &self.highlight_class
    }

    #[must_use]
    pub fn table_selector(&self) -> &str {
        &self.table_selector
    }

    #[must_use]
    pub fn snippet_window(&self) -> usize {
        self.snippet_window
    }

    #[must_use]
    pub fn search_chunk_size(&self) -> usize {
        self.search_chunk_size
    }

    #[must_use]
    pub fn default_search_limit(&self) -> usize {
        self.default_search_limit
    }

    #[must_use]
    pub fn export_name_template(&self) -> &str {
        &self.export_name_template
    }

    #[must_use]
    pub fn export_user(&self) -> Option<&str> {
        self.export_user.as_deref()
    }
}
