//! Fetch-or-cache for the reviewer sheet export.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::SheetError;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP timeout for the whole export request (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// File name of the cached workbook inside the cache directory.
pub const CACHE_FILE_NAME: &str = "reviewers.xlsx";

fn user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("joss-reviewers/{version} (reviewer-sheet-normalizer)")
}

/// HTTP client that downloads the sheet export into an on-disk cache.
///
/// ```no_run
/// use reviewers_core::sheet::SheetClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SheetClient::new()?;
/// let path = client
///     .ensure_cached("https://example.com/export", Path::new("/tmp/reviewers"), false)
///     .await?;
/// println!("Sheet at {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
}

impl SheetClient {
    /// Creates a client with the default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Network`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, SheetError> {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Network`] if the HTTP client cannot be built.
    pub fn with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Result<Self, SheetError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent())
            .build()
            .map_err(|e| SheetError::network("<client builder>", e))?;
        Ok(Self { client })
    }

    /// Returns the cached workbook path, downloading it first when it is
    /// missing or `force` is set.
    ///
    /// The download is written to a temporary file next to the cache entry
    /// and renamed into place only once complete, so an interrupted fetch
    /// never leaves a truncated workbook behind.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError`] if the URL is invalid, the request fails, the
    /// server answers with a non-success status, or the cache cannot be
    /// written.
    #[instrument(skip(self), fields(cache_dir = %cache_dir.display()))]
    pub async fn ensure_cached(
        &self,
        url: &str,
        cache_dir: &Path,
        force: bool,
    ) -> Result<PathBuf, SheetError> {
        let path = cache_dir.join(CACHE_FILE_NAME);
        if !force && fs::try_exists(&path).await.unwrap_or(false) {
            info!(path = %path.display(), "Using cached sheet");
            return Ok(path);
        }

        validate_url(url)?;
        fs::create_dir_all(cache_dir)
            .await
            .map_err(|e| SheetError::io(cache_dir, e))?;

        info!(%url, force, "Fetching reviewer sheet");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SheetError::network(url, e))?;
        if !response.status().is_success() {
            return Err(SheetError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let partial = cache_dir.join(format!("{CACHE_FILE_NAME}.part"));
        let mut file = File::create(&partial)
            .await
            .map_err(|e| SheetError::io(&partial, e))?;
        let written = match stream_to_file(&mut file, response, url, &partial).await {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(&partial).await;
                return Err(e);
            }
        };
        drop(file);

        fs::rename(&partial, &path)
            .await
            .map_err(|e| SheetError::io(&path, e))?;
        info!(path = %path.display(), bytes = written, "Cached reviewer sheet");
        Ok(path)
    }
}

fn validate_url(url: &str) -> Result<(), SheetError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(SheetError::InvalidUrl {
            url: url.to_string(),
        }),
    }
}

async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, SheetError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| SheetError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| SheetError::io(file_path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| SheetError::io(file_path, e))?;
    debug!(bytes = bytes_written, "Sheet body written");
    Ok(bytes_written)
}
