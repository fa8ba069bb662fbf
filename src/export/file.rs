//! Export file naming and writing

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::{TableViewError, TableViewResult};

use super::format::Export;

/// Build an export file name from `template`.
///
/// `{table}` becomes `table`, `{date}` the `YYYY-MM-DD` form of `date`, and
/// `{user}` the export user (empty when unset). The result is sanitized for
/// use as a single path component and suffixed with `extension`.
///
/// ```
/// # use chrono::NaiveDate;
/// # use kodegen_tools_tableview::export::export_file_name;
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(
///     export_file_name("{table}_{date}", "Q1 Sales", None, date, "csv"),
///     "Q1 Sales_2024-03-09.csv"
/// );
/// ```
#[must_use]
pub fn export_file_name(
    template: &str,
    table: &str,
    user: Option<&str>,
    date: NaiveDate,
    extension: &str,
) -> String {
    let stem = template
        .replace("{table}", table)
        .replace("{date}", &date.format("%Y-%m-%d").to_string())
        .replace("{user}", user.unwrap_or_default());
    let stem = sanitize_filename::sanitize(stem.trim());
    let stem = if stem.is_empty() { "table".to_string() } else { stem };
    format!("{stem}.{extension}")
}

/// Write `export` into `dir` under its file name and return the full path.
///
/// The content goes to a temporary file first and is renamed into place, so
/// an interrupted write never leaves a truncated export behind.
pub async fn save_export(dir: &Path, export: &Export) -> TableViewResult<PathBuf> {
    if export.file_name.is_empty() {
        return Err(TableViewError::Export("export has no file name".to_string()));
    }
    let path = dir.join(&export.file_name);
    write_atomic(&path, export.content.as_bytes()).await?;
    Ok(path)
}

/// Temporary sibling of `path`: the full file name with `.part` appended.
fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create export directory {}", parent.display()))?;
    }

    let temp_path = part_path(path);
    let mut file = fs::File::create(&temp_path)
        .await
        .with_context(|| format!("Failed to create {}", temp_path.display()))?;
    file.write_all(bytes)
        .await
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    file.sync_all()
        .await
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;
    drop(file);

    fs::rename(&temp_path, path)
        .await
        .with_context(|| format!("Failed to move export into place at {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn substitutes_every_placeholder() {
        let name = export_file_name("{user}-{table}-{date}", "Report", Some("ana"), date(), "md");
        assert_eq!(name, "ana-Report-2025-01-31.md");
    }

    #[test]
    fn strips_path_separators() {
        let name = export_file_name("{table}", "a/b\\c", None, date(), "txt");
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn empty_stem_gets_a_default() {
        assert_eq!(export_file_name("{user}", "x", None, date(), "csv"), "table.csv");
    }

    #[test]
    fn temp_files_differ_per_format() {
        let dir = Path::new("out");
        assert_eq!(part_path(&dir.join("x.csv")), dir.join("x.csv.part"));
        assert_ne!(part_path(&dir.join("x.csv")), part_path(&dir.join("x.tsv")));
    }
}
