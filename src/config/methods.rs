//! Builder setter methods
//!
//! Each setter overrides one default. Values are checked together in
//! `build()`, not here.

use super::builder::TableViewConfigBuilder;

impl TableViewConfigBuilder {
    /// Quiet period before a typed query triggers a search
    ///
    /// Keystrokes arriving within this window restart it, so a burst of
    /// typing produces exactly one search. Zero disables debouncing.
    #[must_use]
    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.debounce_ms = ms;
        self
    }

    #[must_use]
    pub fn highlight_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.highlight_tag = tag.into();
        self
    }

    #[must_use]
    pub fn highlight_class(mut self, class: impl Into<String>) -> Self {
        self.config.highlight_class = class.into();
        self
    }

    /// Selector used to find interactive tables in the host document
    #[must_use]
    pub fn table_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.table_selector = selector.into();
        self
    }

    #[must_use]
    pub fn snippet_window(mut self, chars: usize) -> Self {
        self.config.snippet_window = chars;
        self
    }

    /// Rows the background worker scans before checking whether its search
    /// was superseded
    #[must_use]
    pub fn search_chunk_size(mut self, rows: usize) -> Self {
        self.config.search_chunk_size = rows;
        self
    }

    #[must_use]
    pub fn default_search_limit(mut self, limit: usize) -> Self {
        self.config.default_search_limit = limit;
        self
    }

    /// Export file name template
    ///
    /// `{table}` expands to the table title, `{date}` to today's date as
    /// `YYYY-MM-DD` and `{user}` to the configured export user.
    #[must_use]
    pub fn export_name_template(mut self, template: impl Into<String>) -> Self {
        self.config.export_name_template = template.into();
        self
    }

    #[must_use]
    pub fn export_user(mut self, user: Option<String>) -> Self {
        self.config.export_user = user;
        self
    }
}
