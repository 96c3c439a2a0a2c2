//! Downloader module containing the download loop, builder pattern, and
//! configuration.
//!
//! # Overview
//!
//! - `downloader` - the [`Downloader`] and its phases
//! - `builder` - [`DownloaderBuilder`] for configuration using the builder pattern
//! - `config` - [`DownloaderConfig`] and its defaults
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .url("http://127.0.0.1:8080")
//!     .output(PathBuf::from("./downloads/file.bin"))
//!     .chunk_size_kb(256)
//!     .retries(3)
//!     .on_progress(|event| println!("{}", event))
//!     .build();
//!
//! let summary = downloader.download().await?;
//! println!("SHA-256: {}", summary.digest());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::DownloaderConfig;
pub use downloader::{Downloader, Phase};
