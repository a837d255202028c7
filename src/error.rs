// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading corrections or patching
/// source files. Loader-phase variants (`SourceNotFound`, `ReadError`)
/// are fatal to the run; the applier-phase variants are scoped to a
/// single file and end up in the run report instead of aborting the batch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("correction file not found: {path:?}")]
    SourceNotFound { path: PathBuf },

    #[error("failed to read {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("source file listed in corrections not found under root: {name}")]
    MissingSourceFile { name: String },

    #[error("source file {name} is missing required column(s): {missing}")]
    InvalidSchema { name: String, missing: String },

    #[error("failed to rewrite {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn messages_carry_the_offending_path_or_key() {
        let err = Error::SourceNotFound {
            path: Path::new("Text/TheNewMain.csv").to_path_buf(),
        };
        assert!(err.to_string().contains("Text/TheNewMain.csv"));

        let err = Error::MissingSourceFile {
            name: "fileB.csv".to_string(),
        };
        assert!(err.to_string().contains("fileB.csv"));

        let err = Error::InvalidSchema {
            name: "fileA.csv".to_string(),
            missing: "sheet_id, string".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("fileA.csv"));
        assert!(text.contains("sheet_id, string"));
    }

    #[test]
    fn read_and_write_errors_keep_the_underlying_cause() {
        let err = Error::ReadError {
            path: Path::new("BIN/fileA.csv").to_path_buf(),
            source: anyhow::anyhow!("stream did not contain valid UTF-8"),
        };
        let text = err.to_string();
        assert!(text.contains("BIN/fileA.csv"));
        assert!(text.contains("valid UTF-8"));

        let err = Error::WriteError {
            path: Path::new("BIN/fileA.csv").to_path_buf(),
            source: anyhow::anyhow!("disk full"),
        };
        assert!(err.to_string().contains("disk full"));
    }
}
