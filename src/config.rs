// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Column names expected in the correction file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorrectionColumns {
    /// Column holding the source data file's name.
    pub file: String,
    /// Column holding the row identifier within that file.
    pub row_id: String,
    /// Column holding the replacement text.
    pub text: String,
}

impl Default for CorrectionColumns {
    fn default() -> Self {
        Self {
            file: "NomeDoArquivo".to_string(),
            row_id: "sheet_ID".to_string(),
            text: "traduzido".to_string(),
        }
    }
}

/// Column names expected in the source data files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceColumns {
    pub row_id: String,
    pub text: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            row_id: "sheet_id".to_string(),
            text: "string".to_string(),
        }
    }
}

/// Run configuration. Header matching against the configured names is
/// case- and whitespace-insensitive (see `schema::resolve`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Folder holding the source data files to be patched.
    pub source_folder: PathBuf,
    /// The correction file mapping (file, row id) to replacement text.
    pub correction_file: PathBuf,
    pub columns: CorrectionColumns,
    pub source_columns: SourceColumns,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_folder: PathBuf::from("BIN"),
            correction_file: PathBuf::from("Text/TheNewMain.csv"),
            columns: CorrectionColumns::default(),
            source_columns: SourceColumns::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file. Missing keys fall back to defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let cfg = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(cfg)
    }
}
