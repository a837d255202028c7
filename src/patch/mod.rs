// src/patch/mod.rs
//
// Patch Applier: walk every source file referenced by the correction
// table, replace matching rows' text column, and rewrite only the files
// that actually changed. Per-file failures are logged and reported, never
// fatal to the rest of the batch.

use crate::config::SourceColumns;
use crate::corrections::CorrectionTable;
use crate::error::Error;
use crate::report::RunReport;
use crate::schema;
use crate::table::Table;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info, instrument, warn};

/// Apply `corrections` to the files under `root`. Key order across files
/// is unspecified; row order within each rewritten file is preserved.
#[instrument(level = "info", skip(root, corrections, columns), fields(root = %root.display()))]
pub fn apply_all(
    root: &Path,
    corrections: &CorrectionTable,
    columns: &SourceColumns,
) -> RunReport {
    let mut report = RunReport::default();

    for (name, per_file) in corrections {
        match apply_one(root, name, per_file, columns) {
            Ok(applied) if applied > 0 => {
                info!(file = %name, applied, "updated");
                report.updated.push(name.clone());
            }
            Ok(_) => {
                info!(file = %name, "no corresponding translation found");
                report.unchanged.push(name.clone());
            }
            Err(err @ Error::MissingSourceFile { .. }) => {
                warn!("{}", err);
                report.missing.push(name.clone());
            }
            Err(err @ Error::InvalidSchema { .. }) => {
                warn!("{}", err);
                report.invalid_schema.push(name.clone());
            }
            Err(err) => {
                error!("{}", err);
                report.failed.push((name.clone(), err.to_string()));
            }
        }
    }

    report
}

/// Patch a single source file. Returns the number of rows whose text
/// actually changed; the file is rewritten only when that count is
/// non-zero, so an untouched file keeps its bytes and its mtime.
fn apply_one(
    root: &Path,
    name: &str,
    per_file: &HashMap<String, String>,
    columns: &SourceColumns,
) -> Result<usize, Error> {
    let path = root.join(name);
    if !path.exists() {
        return Err(Error::MissingSourceFile {
            name: name.to_string(),
        });
    }

    // Read fully and close before any write handle is opened on this path.
    let mut table = Table::load(&path).map_err(|source| Error::ReadError {
        path: path.clone(),
        source,
    })?;

    let binding = schema::resolve(&table.headers, &[columns.row_id.as_str(), columns.text.as_str()]).map_err(
        |missing| Error::InvalidSchema {
            name: name.to_string(),
            missing: missing.join(", "),
        },
    )?;
    let (id_idx, text_idx) = (binding.index(0), binding.index(1));

    let mut applied = 0usize;
    for row in &mut table.rows {
        let Some(row_id) = row.get(id_idx) else {
            continue;
        };
        let Some(replacement) = per_file.get(row_id) else {
            continue;
        };
        match row.get_mut(text_idx) {
            Some(text) if *text != *replacement => {
                *text = replacement.clone();
                applied += 1;
            }
            _ => {}
        }
    }

    if applied > 0 {
        table
            .write_atomic(&path)
            .map_err(|source| Error::WriteError {
                path: path.clone(),
                source,
            })?;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceColumns;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn corrections(entries: &[(&str, &[(&str, &str)])]) -> CorrectionTable {
        entries
            .iter()
            .map(|(file, rows)| {
                (
                    file.to_string(),
                    rows.iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                )
            })
            .collect()
    }

    fn root_with(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn replaces_matching_rows_and_keeps_the_rest() {
        let dir = root_with(&[(
            "fileA.csv",
            "sheet_id,string\n1,old1\n2,old2\n",
        )]);
        let table = corrections(&[("fileA.csv", &[("1", "new1")])]);

        let report = apply_all(dir.path(), &table, &SourceColumns::default());
        assert_eq!(report.updated, vec!["fileA.csv"]);

        let out = fs::read_to_string(dir.path().join("fileA.csv")).unwrap();
        assert_eq!(out, "sheet_id,string\n1,new1\n2,old2\n");
    }

    #[test]
    fn extra_columns_and_order_pass_through() {
        let dir = root_with(&[(
            "fileA.csv",
            "unknown_1,sheet_id,string\nu1,1,old1\nu2,2,old2\nu3,3,old3\n",
        )]);
        let table = corrections(&[("fileA.csv", &[("2", "patched")])]);

        apply_all(dir.path(), &table, &SourceColumns::default());
        let out = fs::read_to_string(dir.path().join("fileA.csv")).unwrap();
        assert_eq!(
            out,
            "unknown_1,sheet_id,string\nu1,1,old1\nu2,2,patched\nu3,3,old3\n"
        );
    }

    #[test]
    fn missing_source_file_is_reported_and_run_continues() {
        let dir = root_with(&[("fileA.csv", "sheet_id,string\n1,old\n")]);
        let table = corrections(&[
            ("fileA.csv", &[("1", "new")]),
            ("fileB.csv", &[("1", "never")]),
        ]);

        let report = apply_all(dir.path(), &table, &SourceColumns::default());
        assert_eq!(report.updated, vec!["fileA.csv"]);
        assert_eq!(report.missing, vec!["fileB.csv"]);
    }

    #[test]
    fn schema_invalid_file_is_skipped_untouched() {
        let original = "id,value\n1,old\n";
        let dir = root_with(&[("fileA.csv", original)]);
        let table = corrections(&[("fileA.csv", &[("1", "new")])]);

        let report = apply_all(dir.path(), &table, &SourceColumns::default());
        assert_eq!(report.invalid_schema, vec!["fileA.csv"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("fileA.csv")).unwrap(),
            original
        );
    }

    #[test]
    fn file_without_matching_rows_is_not_rewritten() {
        let original = "sheet_id,string\n1,old\n";
        let dir = root_with(&[("fileA.csv", original)]);
        let path = dir.path().join("fileA.csv");
        let mtime_before = fs::metadata(&path).unwrap().modified().unwrap();

        let table = corrections(&[("fileA.csv", &[("99", "new")])]);
        let report = apply_all(dir.path(), &table, &SourceColumns::default());

        assert_eq!(report.unchanged, vec!["fileA.csv"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), mtime_before);
    }

    #[test]
    fn second_identical_run_is_a_no_op() {
        let dir = root_with(&[(
            "fileA.csv",
            "sheet_id,string\n1,old1\n2,old2\n",
        )]);
        let table = corrections(&[("fileA.csv", &[("1", "new1")])]);
        let cols = SourceColumns::default();
        let path = dir.path().join("fileA.csv");

        let first = apply_all(dir.path(), &table, &cols);
        assert_eq!(first.updated, vec!["fileA.csv"]);
        let after_first = fs::read_to_string(&path).unwrap();

        let second = apply_all(dir.path(), &table, &cols);
        assert_eq!(second.unchanged, vec!["fileA.csv"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn unreferenced_files_are_byte_identical_after_a_run() {
        let bystander = "sheet_id,string\n9,untouched\n";
        let dir = root_with(&[
            ("fileA.csv", "sheet_id,string\n1,old\n"),
            ("other.csv", bystander),
        ]);
        let table = corrections(&[("fileA.csv", &[("1", "new")])]);

        apply_all(dir.path(), &table, &SourceColumns::default());
        assert_eq!(
            fs::read_to_string(dir.path().join("other.csv")).unwrap(),
            bystander
        );
    }

    #[test]
    fn bom_carrying_source_file_is_patched_and_rewritten_without_bom() {
        let dir = root_with(&[(
            "fileA.csv",
            "\u{feff}sheet_id,string\n1,old\n",
        )]);
        let table = corrections(&[("fileA.csv", &[("1", "new")])]);

        apply_all(dir.path(), &table, &SourceColumns::default());
        let out = fs::read_to_string(dir.path().join("fileA.csv")).unwrap();
        assert_eq!(out, "sheet_id,string\n1,new\n");
    }
}
