// src/report.rs

use std::fmt;

/// Outcome of one applier run, bucketed per source file. Every key in the
/// correction table lands in exactly one bucket.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Files rewritten with at least one applied correction.
    pub updated: Vec<String>,
    /// Files read but left untouched: no corresponding translation found.
    pub unchanged: Vec<String>,
    /// Correction keys whose file does not exist under the root folder.
    pub missing: Vec<String>,
    /// Files lacking the required row-id/text columns.
    pub invalid_schema: Vec<String>,
    /// Files whose read-back or rewrite failed, with the failure message.
    pub failed: Vec<(String, String)>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.updated.len()
            + self.unchanged.len()
            + self.missing.len()
            + self.invalid_schema.len()
            + self.failed.len()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "patch run: {} file(s) referenced by corrections", self.total())?;
        for name in &self.updated {
            writeln!(f, "  updated              {}", name)?;
        }
        for name in &self.unchanged {
            writeln!(f, "  no matching rows     {}", name)?;
        }
        for name in &self.missing {
            writeln!(f, "  missing source file  {}", name)?;
        }
        for name in &self.invalid_schema {
            writeln!(f, "  invalid schema       {}", name)?;
        }
        for (name, err) in &self.failed {
            writeln!(f, "  failed               {} ({})", name, err)?;
        }
        write!(
            f,
            "{} updated, {} unchanged, {} missing, {} invalid, {} failure(s)",
            self.updated.len(),
            self.unchanged.len(),
            self.missing.len(),
            self.invalid_schema.len(),
            self.failed.len()
        )
    }
}
