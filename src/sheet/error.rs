//! Error types for fetching and reading the reviewer sheet.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching, caching, or reading the sheet.
///
/// All of them abort the run; there is no retry.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The sheet URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The sheet URL.
        url: String,
    },

    /// HTTP error response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The sheet URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The configured URL is malformed or not http(s).
    #[error("invalid sheet URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// File system error while writing or reading the cached sheet.
    #[error("IO error at {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The cached file is not a readable XLSX workbook.
    #[error("cannot read workbook {path}: {source}\n  Suggestion: re-run with --force to fetch a fresh copy")]
    Workbook {
        /// Path of the workbook.
        path: PathBuf,
        /// The underlying spreadsheet error.
        #[source]
        source: calamine::XlsxError,
    },

    /// The workbook has no worksheet to read.
    #[error("workbook {path} contains no worksheet")]
    NoWorksheet {
        /// Path of the workbook.
        path: PathBuf,
    },
}

impl SheetError {
    /// Creates a network error, classifying timeouts separately.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
