//! Configuration structures and defaults for the downloader.
//!
//! [`DownloaderConfig`] carries everything a download needs; the
//! [`DownloaderBuilder`](super::DownloaderBuilder) is the usual way to fill it
//! in. The defaults match the command-line defaults: a local server on port
//! 8080, `downloaded.bin` in the working directory, and 1 MiB chunks.

use crate::http::HttpClientConfig;
use crate::progress::{ProgressBarOpts, ProgressCallback};

use reqwest::header::HeaderMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Endpoint used when none is configured.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";
/// Output path used when none is configured.
pub const DEFAULT_OUTPUT: &str = "downloaded.bin";
/// Chunk size, in KiB, used when none is configured.
pub const DEFAULT_CHUNK_SIZE_KB: u64 = 1024;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Endpoint serving the resource.
    pub url: String,
    /// Where to write the resource.
    pub output: PathBuf,
    /// Maximum number of bytes requested per chunk.
    pub chunk_size: u64,
    /// Number of retries allowed per range before the download is aborted.
    pub retries: u32,
    /// Shortest wait before a failed range is fetched again.
    pub min_retry_interval: Duration,
    /// Longest wait before a failed range is fetched again.
    pub max_retry_interval: Duration,
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum time for a single request, body included.
    pub timeout: Duration,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Ignore system proxy settings.
    pub no_proxy: bool,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Expected SHA-256 digest of the completed file, as hex.
    pub expected_sha256: Option<String>,
    /// Progress bar options.
    pub progress_bar: ProgressBarOpts,
    /// Callback for progress events.
    pub on_progress: Option<Arc<ProgressCallback>>,
}

impl DownloaderConfig {
    /// HTTP client configuration derived from this configuration.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            connect_timeout: self.connect_timeout,
            timeout: self.timeout,
            proxy: self.proxy.clone(),
            no_proxy: self.no_proxy,
            headers: self.headers.clone(),
        }
    }
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("url", &self.url)
            .field("output", &self.output)
            .field("chunk_size", &self.chunk_size)
            .field("retries", &self.retries)
            .field("min_retry_interval", &self.min_retry_interval)
            .field("max_retry_interval", &self.max_retry_interval)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("no_proxy", &self.no_proxy)
            .field("headers", &self.headers)
            .field("expected_sha256", &self.expected_sha256)
            .field("progress_bar", &self.progress_bar)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        let http = HttpClientConfig::default();
        Self {
            url: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            chunk_size: DEFAULT_CHUNK_SIZE_KB * 1024,
            retries: 5,
            min_retry_interval: Duration::from_millis(500),
            max_retry_interval: Duration::from_secs(30),
            connect_timeout: http.connect_timeout,
            timeout: http.timeout,
            proxy: None,
            no_proxy: false,
            headers: None,
            expected_sha256: None,
            progress_bar: ProgressBarOpts::default(),
            on_progress: None,
        }
    }
}
