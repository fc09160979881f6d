//! Error types for writing output artifacts.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing an output file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File system error (create directory, create file, flush).
    #[error("IO error writing {path}: {source}")]
    Io {
        /// The file or directory being written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Tab-separated table could not be written.
    #[error("cannot write table {path}: {source}")]
    Csv {
        /// The table being written.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// JSON export could not be serialized.
    #[error("cannot write JSON {path}: {source}")]
    Json {
        /// The JSON file being written.
        path: PathBuf,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
