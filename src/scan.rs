// src/scan.rs
//
// Directory scanning shared by the applier and the consolidation tools:
// list a folder, keep entries matching an extension, optionally order them
// by a key derived from the filename.

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::warn;

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());

/// List the files directly under `dir` whose extension matches `ext`
/// (case-insensitive, without the dot). Results come back in whatever
/// order the filesystem yields them.
pub fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    // The directory portion is literal text, not a pattern; escape it so a
    // root like "saves [backup]" still matches its own contents.
    let pattern = format!("{}/*", Pattern::escape(&dir.display().to_string()));
    let mut files = Vec::new();
    for entry in glob(&pattern).context("invalid glob pattern for directory scan")? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches {
            files.push(path);
        }
    }
    Ok(files)
}

/// Same listing, but ordered ascending by a key derived from the filename.
pub fn files_sorted_by<K: Ord>(
    dir: &Path,
    ext: &str,
    key: impl Fn(&str) -> K,
) -> Result<Vec<PathBuf>> {
    let mut files = files_with_extension(dir, ext)?;
    files.sort_by_key(|p| key(&file_name(p)));
    Ok(files)
}

/// First integer embedded in `filename`, or 0 when there is none. Used to
/// process numbered exports ("dialog_2.csv", "dialog_10.csv") in numeric
/// rather than lexicographic order.
pub fn numeric_key(filename: &str) -> u64 {
    FIRST_NUMBER
        .captures(filename)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Lossy filename component of `path`, empty when the path has none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
