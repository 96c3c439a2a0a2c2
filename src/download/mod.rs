//! Download state: the transfer plan, completion tracking, the output file
//! and integrity verification.
//!
//! # Overview
//!
//! - [`plan`] - [`TransferPlan`], [`FetchRange`] and [`ChunkResult`]
//! - [`tracker`] - per-byte completion state and gap selection
//! - [`sink`] - the pre-sized output file
//! - [`hash`] - SHA-256 digest of the completed file
//! - [`summary`] - the outcome of a completed download
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::download::{RangeTracker, TransferPlan};
//!
//! let mut tracker = RangeTracker::new(TransferPlan::new(3_000_000, 1024 * 1024)).unwrap();
//! let mut fetches = 0;
//! while let Some(gap) = tracker.next_gap() {
//!     // fetch `gap` here, then record it
//!     tracker.mark_complete(gap.start, gap.len());
//!     fetches += 1;
//! }
//! assert_eq!(fetches, 3);
//! ```

pub mod hash;
pub mod plan;
pub mod sink;
pub mod summary;
pub mod tracker;

pub use hash::{digest_matches, sha256_file};
pub use plan::{ChunkResult, FetchRange, TransferPlan};
pub use sink::OutputSink;
pub use summary::Summary;
pub use tracker::RangeTracker;
