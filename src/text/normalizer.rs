//! Search-key normalization
//!
//! Turns arbitrary cell or query text into the canonical key used for
//! matching:
//!
//! 1. Lowercase (locale-independent Unicode rules)
//! 2. Canonical decomposition (NFD)
//! 3. Drop combining diacritical marks (U+0300..=U+036F)
//! 4. Drop everything that is not a letter, digit or whitespace
//! 5. Collapse whitespace runs to one space
//! 6. Trim both ends
//!
//! Steps 1-4 run per source character through [`fold_char`], which is what
//! lets the offset map attribute every key character to the exact source
//! character it came from.
//!
//! Without the `unicode-normalization` feature the pipeline degrades to the
//! ASCII mode: lowercase, keep `[a-z0-9_]` and whitespace.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::char::decompose_canonical;

/// Which character filter the pipeline applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Accent folding plus Unicode letter/digit filtering
    Unicode,
    /// ASCII word characters and whitespace only
    Ascii,
}

impl Default for NormalizeMode {
    fn default() -> Self {
        if cfg!(feature = "unicode-normalization") {
            NormalizeMode::Unicode
        } else {
            NormalizeMode::Ascii
        }
    }
}

impl NormalizeMode {
    /// The mode that will actually run, after accounting for compiled features
    #[inline]
    #[must_use]
    pub fn effective(self) -> Self {
        match self {
            NormalizeMode::Unicode if cfg!(feature = "unicode-normalization") => {
                NormalizeMode::Unicode
            }
            _ => NormalizeMode::Ascii,
        }
    }
}

/// Normalize `text` with the default mode.
///
/// Total: empty input yields an empty key.
///
/// ```
/// # use kodegen_tools_tableview::text::normalize;
/// assert_eq!(normalize("Café   de Flore!!"), "cafe de flore");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    normalize_with(text, NormalizeMode::default())
}

/// Normalize `text` with an explicit mode.
#[must_use]
pub fn normalize_with(text: &str, mode: NormalizeMode) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        fold_char(ch, mode, |c| {
            push_key_char(&mut out, c);
        });
    }
    trim_key_end(&mut out);
    out
}

/// Apply the per-character steps of the pipeline to one source character.
///
/// `emit` receives zero or more folded characters. Whitespace is always
/// emitted as a plain space; collapsing is left to [`push_key_char`].
#[inline]
pub(crate) fn fold_char<F: FnMut(char)>(ch: char, mode: NormalizeMode, mut emit: F) {
    match mode.effective() {
        #[cfg(feature = "unicode-normalization")]
        NormalizeMode::Unicode => {
            for lower in ch.to_lowercase() {
                decompose_canonical(lower, |d| {
                    if is_combining_diacritic(d) {
                        return;
                    }
                    if d.is_alphanumeric() {
                        emit(d);
                    } else if d.is_whitespace() {
                        emit(' ');
                    }
                });
            }
        }
        _ => {
            for lower in ch.to_lowercase() {
                if lower.is_ascii_alphanumeric() || lower == '_' {
                    emit(lower);
                } else if lower.is_whitespace() {
                    emit(' ');
                }
            }
        }
    }
}

/// Append a folded character to a key, collapsing whitespace.
///
/// Returns `true` when the character was actually appended. Leading spaces
/// and spaces following another space are dropped.
#[inline]
pub(crate) fn push_key_char(out: &mut String, c: char) -> bool {
    if c == ' ' && (out.is_empty() || out.ends_with(' ')) {
        return false;
    }
    out.push(c);
    true
}

/// Drop the single trailing space a collapsed key may end with.
///
/// Returns `true` when a character was removed.
#[inline]
pub(crate) fn trim_key_end(out: &mut String) -> bool {
    if out.ends_with(' ') {
        out.pop();
        true
    } else {
        false
    }
}

#[inline]
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Sort key for locale-aware text ordering.
///
/// Lowercased and accent-folded but punctuation is kept, so `"Éclair"` sorts
/// next to `"eclair"` while `"a-b"` and `"ab"` stay distinct.
#[must_use]
pub fn collation_key(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        for lower in ch.to_lowercase() {
            #[cfg(feature = "unicode-normalization")]
            decompose_canonical(lower, |d| {
                if !is_combining_diacritic(d) {
                    out.push(d);
                }
            });
            #[cfg(not(feature = "unicode-normalization"))]
            out.push(lower);
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
