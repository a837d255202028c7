// src/table.rs
//
// Full-buffer tabular file I/O. Every reader here loads the whole file,
// closes it, and only then may a writer touch the same path; read and
// write handles never overlap.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::{fs, path::Path};
use tempfile::NamedTempFile;

const UTF8_BOM: &str = "\u{feff}";

/// One tabular file held fully in memory: the header row as the file
/// declared it, and every data row as positional string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names, exactly as spelled in the file.
    pub headers: Vec<String>,
    /// Data rows, one `Vec<String>` per record, aligned with `headers`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read `path` fully into memory. A leading UTF-8 byte-order mark is
    /// stripped before the header row is parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let content = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("reading header row of {}", path.display()))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("reading record from {}", path.display()))?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Ok(Table { headers, rows })
    }

    /// Rewrite `path` with the table's current contents. The data goes to a
    /// temporary file in the same directory first and is renamed over the
    /// original, so a failed write never leaves a truncated file behind.
    /// Output carries no byte-order mark.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file next to {}", path.display()))?;

        {
            let mut writer = WriterBuilder::new().flexible(true).from_writer(tmp.as_file());
            writer
                .write_record(&self.headers)
                .with_context(|| format!("writing header row for {}", path.display()))?;
            for row in &self.rows {
                writer
                    .write_record(row)
                    .with_context(|| format!("writing record for {}", path.display()))?;
            }
            writer
                .flush()
                .with_context(|| format!("flushing {}", path.display()))?;
        }

        tmp.persist(path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}
