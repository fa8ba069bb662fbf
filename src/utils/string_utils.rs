//! UTF-8-safe string slicing utilities
//!
//! Snippet windows and export labels are cut by character count, never by
//! byte count, so multi-byte characters (accented letters, CJK, emoji) are
//! never split.

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// # Examples
/// ```
/// # use kodegen_tools_tableview::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("café crème", 4), "café");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Cut a window of at most `window` characters out of `s`, centered on the
/// character that starts at byte offset `focus_byte`.
///
/// The window is shifted left when it would run past the end of the string,
/// so short rows are returned whole and long rows always yield a full window.
/// A `focus_byte` that is not a char boundary is rounded down to one.
///
/// # Examples
/// ```
/// # use kodegen_tools_tableview::utils::string_utils::centered_window;
/// let text = "alpha | beta | gamma | delta";
/// assert_eq!(centered_window(text, 8, 10), "ha | beta ");
/// assert_eq!(centered_window("short", 0, 200), "short");
/// ```
pub fn centered_window(s: &str, focus_byte: usize, window: usize) -> &str {
    let total_chars = s.chars().count();
    if total_chars <= window {
        return s;
    }

    let mut focus = focus_byte.min(s.len());
    while !s.is_char_boundary(focus) {
        focus -= 1;
    }
    let focus_char = s[..focus].chars().count();

    let start_char = focus_char
        .saturating_sub(window / 2)
        .min(total_chars - window);

    let start_byte = s
        .char_indices()
        .nth(start_char)
        .map_or(s.len(), |(idx, _)| idx);
    safe_truncate_chars(&s[start_byte..], window)
}

/// Collapse every whitespace run into a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_never_splits_multibyte_chars() {
        let text = "ééééééééééééééééééé";
        let out = centered_window(text, 10, 5);
        assert_eq!(out.chars().count(), 5);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn window_clamps_at_the_end() {
        let text = "0123456789";
        assert_eq!(centered_window(text, 9, 4), "6789");
        assert_eq!(centered_window(text, 0, 4), "0123");
    }

    #[test]
    fn non_boundary_focus_is_rounded_down() {
        let text = "aéb";
        // byte 2 is inside 'é'
        assert_eq!(centered_window(text, 2, 2), "aé");
    }

    #[test]
    fn collapse_whitespace_trims_and_joins() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
