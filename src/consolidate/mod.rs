// src/consolidate/mod.rs
//
// Consolidation utilities: gather localization rows scattered across a
// folder of exported files into one combined file that translators work
// on. The combined CSV is what later comes back (with a translated
// column added) as the correction file for the patch pipeline.

use crate::config::Config;
use crate::schema;
use crate::scan;
use crate::table::Table;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, instrument, warn};

static LATIN_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Za-z]").unwrap());

/// Lines bearing this marker in raw text exports are scaffolding, not
/// translatable content.
const SKIP_MARKER: &str = "[1b]Z";

fn has_latin_letter(text: &str) -> bool {
    LATIN_LETTER.is_match(text)
}

/// Totals for one consolidation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidateSummary {
    pub files_used: usize,
    pub files_skipped: usize,
    pub rows_written: u64,
}

/// Combine every `.csv` under `input_dir` that carries the configured text
/// and row-id columns into one CSV at `output` with the fixed header
/// (file name, text, row id). Files missing the columns, unreadable files,
/// and empty files are logged and skipped.
#[instrument(level = "info", skip_all, fields(dir = %input_dir.display()))]
pub fn consolidate_csvs(
    input_dir: &Path,
    output: &Path,
    config: &Config,
) -> Result<ConsolidateSummary> {
    let files = scan::files_with_extension(input_dir, "csv")
        .with_context(|| format!("scanning {}", input_dir.display()))?;
    write_combined(&files, output, config, None)
}

/// Like [`consolidate_csvs`], but files are visited in ascending order of
/// the first number embedded in their name, only rows whose text contains
/// a Latin letter are kept, and the `extra` pass-through column is carried
/// between the text and the row id.
#[instrument(level = "info", skip_all, fields(dir = %input_dir.display(), extra))]
pub fn consolidate_csvs_filtered(
    input_dir: &Path,
    output: &Path,
    config: &Config,
    extra: &str,
) -> Result<ConsolidateSummary> {
    let files = scan::files_sorted_by(input_dir, "csv", scan::numeric_key)
        .with_context(|| format!("scanning {}", input_dir.display()))?;
    write_combined(&files, output, config, Some(extra))
}

fn write_combined(
    files: &[PathBuf],
    output: &Path,
    config: &Config,
    extra: Option<&str>,
) -> Result<ConsolidateSummary> {
    let text_col = &config.source_columns.text;
    let id_col = &config.source_columns.row_id;

    let mut writer = WriterBuilder::new()
        .from_path(output)
        .with_context(|| format!("creating {}", output.display()))?;

    let mut header = vec![config.columns.file.clone(), text_col.clone()];
    if let Some(extra) = extra {
        header.push(extra.to_string());
    }
    header.push(config.columns.row_id.clone());
    writer
        .write_record(&header)
        .with_context(|| format!("writing header of {}", output.display()))?;

    let mut summary = ConsolidateSummary::default();
    for path in files {
        let name = scan::file_name(path);

        let table = match Table::load(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(file = %name, "skipping unreadable file: {e:#}");
                summary.files_skipped += 1;
                continue;
            }
        };
        if table.headers.is_empty() {
            warn!(file = %name, "skipping file with no header");
            summary.files_skipped += 1;
            continue;
        }

        let mut required = vec![text_col.as_str(), id_col.as_str()];
        if let Some(extra) = extra {
            required.push(extra);
        }
        let binding = match schema::resolve(&table.headers, &required) {
            Ok(b) => b,
            Err(missing) => {
                info!(file = %name, missing = missing.join(", "), "skipping file without required columns");
                summary.files_skipped += 1;
                continue;
            }
        };

        info!(file = %name, "consolidating");
        for row in &table.rows {
            let text = row.get(binding.index(0)).map(String::as_str).unwrap_or("");
            if extra.is_some() && !has_latin_letter(text) {
                continue;
            }
            let row_id = row.get(binding.index(1)).map(String::as_str).unwrap_or("");

            let extra_value;
            let mut record = vec![name.as_str(), text];
            if extra.is_some() {
                extra_value = row.get(binding.index(2)).cloned().unwrap_or_default();
                record.push(extra_value.as_str());
            }
            record.push(row_id);
            writer
                .write_record(&record)
                .with_context(|| format!("writing row from {} to {}", name, output.display()))?;
            summary.rows_written += 1;
        }
        summary.files_used += 1;
    }

    writer
        .flush()
        .with_context(|| format!("flushing {}", output.display()))?;
    info!(
        used = summary.files_used,
        skipped = summary.files_skipped,
        rows = summary.rows_written,
        "consolidation finished"
    );
    Ok(summary)
}

/// Merge raw `.txt` exports into one tab-separated file. Each kept line
/// becomes `file-name<TAB>line-number<TAB>trimmed-line`; blank lines,
/// lines without a Latin letter, and the `[1b]Z` marker are dropped.
/// The output lands next to the first input as `Unification.tsv`; returns
/// the output path and the number of lines kept, or `Ok(None)` when
/// nothing survived the filter.
#[instrument(level = "info", skip(paths))]
pub fn unify_txt_lines(paths: &[PathBuf]) -> Result<Option<(PathBuf, u64)>> {
    let Some(first) = paths.first() else {
        return Ok(None);
    };
    let out_dir = first.parent().unwrap_or_else(|| Path::new("."));
    let out_path = out_dir.join("Unification.tsv");

    let mut kept = Vec::new();
    for path in paths {
        let name = scan::file_name(path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed == SKIP_MARKER || !has_latin_letter(trimmed) {
                continue;
            }
            kept.push(format!("{}\t{}\t{}", name, line_no + 1, trimmed));
        }
    }

    if kept.is_empty() {
        info!("no text found");
        return Ok(None);
    }

    fs::write(&out_path, kept.join("\n"))
        .with_context(|| format!("writing {}", out_path.display()))?;
    info!(lines = kept.len(), out = %out_path.display(), "unified text files");
    Ok(Some((out_path, kept.len() as u64)))
}
