//! Progress reporting.
//!
//! Progress leaves the downloader two ways: as [`ProgressEvent`] values
//! handed to an optional callback, and as an `indicatif` byte counter managed
//! by [`ProgressDisplay`].
//!
//! # Overview
//!
//! - `events` - progress events and the callback type
//! - `style` - progress bar styling options and templates
//! - `display` - the progress bar of a running download
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::downloader::DownloaderBuilder;
//! use rangefetch::progress::{ProgressBarOpts, ProgressEvent};
//!
//! let downloader = DownloaderBuilder::new()
//!     .progress_bar(ProgressBarOpts::hidden())
//!     .on_progress(|event: &ProgressEvent| println!("{}", event))
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod events;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use events::{percent, ProgressCallback, ProgressEvent};
pub use style::ProgressBarOpts;
