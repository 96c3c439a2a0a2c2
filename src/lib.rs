//! rangefetch downloads a single file over HTTP in bounded-size byte ranges,
//! keeps track of which bytes have arrived, fetches failed ranges again, and
//! verifies the completed file with SHA-256.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use rangefetch::{DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .url("http://127.0.0.1:8080")
//!     .output(PathBuf::from("downloaded.bin"))
//!     .chunk_size_kb(1024)
//!     .build();
//! let summary = downloader.download().await?;
//! println!("SHA-256: {}", summary.digest());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`download`] - Transfer plan, completion tracking, output file and hash verification
//! - [`downloader`] - The [`Downloader`] loop and [`DownloaderBuilder`]
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client, size probe and chunk fetch
//! - [`progress`] - Progress events and the progress bar
//! - [`utils`] - Header parsing helpers

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use download::hash::{digest_matches, sha256_file};
pub use download::{ChunkResult, FetchRange, RangeTracker, Summary, TransferPlan};
pub use downloader::{Downloader, DownloaderBuilder, DownloaderConfig, Phase};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig, HttpSource, RangeSource};
pub use progress::{ProgressBarOpts, ProgressEvent};
