// src/schema/mod.rs
//
// Header-driven column resolution. Files declare their columns by name in
// the first row; we bind the names we need to indices once per file and
// use plain indexing for every row after that.

/// Normalized form used for header comparison: lowercased, surrounding
/// whitespace dropped. Matches how the surrounding tools compare headers.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Indices of a set of required columns within one file's header row,
/// in the order the names were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    indices: Vec<usize>,
}

impl ColumnBinding {
    /// Index bound to the `n`th requested column name.
    pub fn index(&self, n: usize) -> usize {
        self.indices[n]
    }
}

/// Resolve `required` column names against `headers`, case- and
/// whitespace-insensitively. On failure returns the missing names; the
/// caller decides whether that is fatal.
pub fn resolve(headers: &[String], required: &[&str]) -> Result<ColumnBinding, Vec<String>> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();

    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for name in required {
        match normalized.iter().position(|h| h == &normalize(name)) {
            Some(idx) => indices.push(idx),
            None => missing.push((*name).to_string()),
        }
    }

    if missing.is_empty() {
        Ok(ColumnBinding { indices })
    } else {
        Err(missing)
    }
}
