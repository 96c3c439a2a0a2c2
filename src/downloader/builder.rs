//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! let downloader = DownloaderBuilder::new()
//!     .url("http://127.0.0.1:8080")
//!     .output(PathBuf::from("downloaded.bin"))
//!     .chunk_size_kb(512)
//!     .retries(3)
//!     .build();
//! ```
//!
//! ## Reporting Progress
//!
//! ```rust
//! use rangefetch::downloader::DownloaderBuilder;
//! use rangefetch::progress::ProgressEvent;
//!
//! let downloader = DownloaderBuilder::hidden()
//!     .on_progress(|event| {
//!         if let ProgressEvent::ChunkFailed { .. } = event {
//!             eprintln!("{}", event);
//!         }
//!     })
//!     .build();
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::progress::{ProgressBarOpts, ProgressEvent};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main()  {
/// use rangefetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().retries(5).output("file.bin".into()).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bar.
    pub fn hidden() -> Self {
        DownloaderBuilder::default().progress_bar(ProgressBarOpts::hidden())
    }

    /// Sets the endpoint to download from.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Sets the path of the output file.
    pub fn output(mut self, output: PathBuf) -> Self {
        self.config.output = output;
        self
    }

    /// Sets the chunk size in bytes. Zero is raised to one byte.
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.config.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets the chunk size in KiB.
    pub fn chunk_size_kb(self, chunk_size_kb: u64) -> Self {
        self.chunk_size(chunk_size_kb.saturating_mul(1024))
    }

    /// Set the number of retries per range.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Set the bounds of the backoff between retries of a range.
    ///
    /// If `max` is shorter than `min`, `min` is used for both.
    pub fn retry_bounds(mut self, min: Duration, max: Duration) -> Self {
        self.config.min_retry_interval = min;
        self.config.max_retry_interval = max.max(min);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Route requests through a proxy.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Connect directly, ignoring system proxy settings.
    pub fn no_proxy(mut self) -> Self {
        self.config.no_proxy = true;
        self
    }

    /// Set the expected SHA-256 digest of the completed file.
    pub fn expected_sha256(mut self, digest: impl Into<String>) -> Self {
        self.config.expected_sha256 = Some(digest.into());
        self
    }

    /// Set the progress bar options.
    pub fn progress_bar(mut self, opts: ProgressBarOpts) -> Self {
        self.config.progress_bar = opts;
        self
    }

    /// Set callback for progress events.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.config.on_progress = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use rangefetch::downloader::DownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_str("curl/7.87").expect("Invalid UA");
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, ua)
    ///     .build();
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
