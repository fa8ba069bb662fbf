//! Shared configuration constants for tableview
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default search debounce: 150 milliseconds
///
/// Rapid keystrokes inside this window collapse into a single search pass.
/// Long enough to skip intermediate queries while typing a word, short enough
/// that results still feel immediate.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Upper bound accepted for the debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Element name used to wrap highlighted ranges
pub const DEFAULT_HIGHLIGHT_TAG: &str = "mark";

/// Class attribute placed on every highlight marker
///
/// Matches the `.highlight` rule shipped with the generated stylesheet.
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "highlight";

/// Selector locating interactive tables inside the host document
pub const DEFAULT_TABLE_SELECTOR: &str = ".table-container table";

/// Snippet window: 200 characters
///
/// Background search results carry the matched row text truncated to this
/// many characters, centered near the first match.
pub const DEFAULT_SNIPPET_WINDOW: usize = 200;

/// Smallest snippet window accepted by the config builder.
pub const MIN_SNIPPET_WINDOW: usize = 20;

/// Rows scanned between two cancellation checkpoints in the background worker
///
/// Smaller chunks react faster to a superseding search; larger chunks spend
/// less time yielding to the runtime.
pub const DEFAULT_SEARCH_CHUNK_SIZE: usize = 250;

/// Maximum matching rows returned by one background search unless overridden.
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Export file name template
///
/// Placeholders: `{table}` (table title), `{date}` (`YYYY-MM-DD`), `{user}`.
pub const DEFAULT_EXPORT_NAME_TEMPLATE: &str = "{table}_{date}";

/// Separator used when flattening a row into a single searchable line.
pub const ROW_TEXT_SEPARATOR: &str = " | ";
