//! Clipboard delivery with a manual fallback
//!
//! The host supplies the clipboard. When it is missing or refuses the
//! write, the caller gets the text back to show in a selectable surface
//! together with a low-severity notice, so a copy action always produces
//! something the user can take.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Host clipboard
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// Short user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Text is on the clipboard
    Copied,
    /// Clipboard failed; the text must be offered for manual copying
    Manual(String),
}

/// Copy `text` to `clipboard`, falling back to manual copy.
///
/// `label` names what was copied in the notice, e.g. `"table as Markdown"`.
pub fn copy_with_fallback<C>(
    clipboard: Option<&mut C>,
    text: &str,
    label: &str,
) -> (CopyOutcome, Notice)
where
    C: Clipboard + ?Sized,
{
    let failure = match clipboard {
        Some(clipboard) => match clipboard.write_text(text) {
            Ok(()) => {
                return (
                    CopyOutcome::Copied,
                    Notice {
                        severity: Severity::Info,
                        message: format!("Copied {label}"),
                    },
                );
            }
            Err(e) => format!("{e:#}"),
        },
        None => "no clipboard available".to_string(),
    };

    warn!(label, reason = %failure, "Clipboard write failed, offering manual copy");
    (
        CopyOutcome::Manual(text.to_string()),
        Notice {
            severity: Severity::Warning,
            message: format!(
                "Could not copy {label} automatically; select the text and copy it manually"
            ),
        },
    )
}
