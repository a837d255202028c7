// src/corrections/mod.rs
//
// Translation Loader: parse one correction file into a lookup of
// (source file name, row id) -> replacement text.

use crate::config::CorrectionColumns;
use crate::error::Error;
use crate::schema;
use crate::table::Table;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Lookup built from the correction file: source file name -> row id ->
/// replacement text. Built once per run, read-only afterward.
pub type CorrectionTable = HashMap<String, HashMap<String, String>>;

/// Load the correction file at `path` into a `CorrectionTable`.
///
/// Rows missing any of the three fields, or with an empty value in one of
/// them, are skipped without error. A later row with the same
/// (file, row id) silently overwrites an earlier one; last one wins is the
/// documented merge policy, not an accident.
#[instrument(level = "info", skip(path, columns), fields(path = %path.display()))]
pub fn load(path: &Path, columns: &CorrectionColumns) -> Result<CorrectionTable, Error> {
    if !path.exists() {
        return Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let table = Table::load(path).map_err(|source| Error::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let binding = schema::resolve(
        &table.headers,
        &[
            columns.file.as_str(),
            columns.row_id.as_str(),
            columns.text.as_str(),
        ],
    )
    .map_err(|missing| Error::ReadError {
        path: path.to_path_buf(),
        source: anyhow::anyhow!("missing column(s): {}", missing.join(", ")),
    })?;
    let (file_idx, id_idx, text_idx) = (binding.index(0), binding.index(1), binding.index(2));

    let mut corrections: CorrectionTable = HashMap::new();
    let mut loaded = 0usize;
    let mut skipped = 0usize;

    for row in &table.rows {
        let file = row.get(file_idx).map(String::as_str).unwrap_or("");
        let row_id = row.get(id_idx).map(String::as_str).unwrap_or("");
        let text = row.get(text_idx).map(String::as_str).unwrap_or("");

        if file.is_empty() || row_id.is_empty() || text.is_empty() {
            skipped += 1;
            continue;
        }

        let per_file = corrections.entry(file.to_string()).or_default();
        if per_file
            .insert(row_id.to_string(), text.to_string())
            .is_some()
        {
            debug!(file, row_id, "duplicate correction key, keeping the later value");
        }
        loaded += 1;
    }

    info!(
        loaded,
        skipped,
        files = corrections.len(),
        "correction table built"
    );
    Ok(corrections)
}
