pub mod constants;
pub mod string_utils;

pub use constants::*;
pub use string_utils::{centered_window, collapse_whitespace, safe_truncate_chars};
