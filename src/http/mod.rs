//! HTTP module containing the network side of a download.
//!
//! # Overview
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`probe`] - total size discovery
//! - [`fetch`] - single-chunk retrieval with `Range` requests
//!
//! The downloader talks to the network through the [`RangeSource`] trait.
//! [`HttpSource`] is the implementation backed by a real HTTP endpoint.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::download::FetchRange;
//! use rangefetch::http::{HttpClientConfig, HttpSource, RangeSource};
//!
//! # async fn example() -> rangefetch::Result<()> {
//! let source = HttpSource::new("http://127.0.0.1:8080", HttpClientConfig::default())?;
//! let total = source.probe().await?;
//! let chunk = source.fetch(FetchRange::new(0, total.min(1024))).await?;
//! println!("got {} bytes at {}", chunk.len(), chunk.offset);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod fetch;
pub mod probe;

pub use client::{create_http_client, HttpClientConfig};

use crate::download::{ChunkResult, FetchRange};
use crate::error::{Error, Result};

use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;

/// A resource that can report its size and serve byte ranges of itself.
#[async_trait]
pub trait RangeSource: Send + Sync {
    /// Learn the total size of the resource.
    async fn probe(&self) -> Result<u64>;

    /// Retrieve the bytes of `range`.
    async fn fetch(&self, range: FetchRange) -> Result<ChunkResult>;
}

/// A [`RangeSource`] backed by an HTTP endpoint.
#[derive(Clone)]
pub struct HttpSource {
    client: ClientWithMiddleware,
    url: Url,
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource").field("url", &self.url).finish()
    }
}

impl HttpSource {
    /// Creates a new [`HttpSource`] for `url`.
    pub fn new(url: &str, config: HttpClientConfig) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| {
            Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", url, e))
        })?;
        let client = create_http_client(config).map_err(|e| Error::Internal(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// Get the endpoint URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RangeSource for HttpSource {
    async fn probe(&self) -> Result<u64> {
        probe::probe(&self.client, &self.url).await
    }

    async fn fetch(&self, range: FetchRange) -> Result<ChunkResult> {
        fetch::fetch(&self.client, &self.url, range).await
    }
}
