//! Download summary.
//!
//! A [`Summary`] is what a finished download hands back: where the file
//! went, how large it is, its digest, and how many chunk attempts it took.
//!
//! ```rust
//! use rangefetch::download::Summary;
//! use std::path::PathBuf;
//!
//! let summary = Summary::new(PathBuf::from("downloaded.bin"), 2048)
//!     .with_chunks(2, 1)
//!     .with_digest("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
//!
//! println!("Downloaded {} bytes in {} chunks", summary.size(), summary.chunks());
//! println!("SHA-256: {}", summary.digest());
//! ```

use std::path::{Path, PathBuf};

/// Represents the outcome of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Path of the output file.
    output: PathBuf,
    /// Total size in bytes.
    size: u64,
    /// Number of chunks successfully fetched.
    chunks: usize,
    /// Number of chunk fetches that failed and were retried.
    failed_attempts: usize,
    /// Hex-rendered SHA-256 digest of the output file.
    digest: String,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(output: PathBuf, size: u64) -> Self {
        Self {
            output,
            size,
            chunks: 0,
            failed_attempts: 0,
            digest: String::new(),
        }
    }

    /// Attach the chunk counters.
    pub fn with_chunks(self, chunks: usize, failed_attempts: usize) -> Self {
        Self {
            chunks,
            failed_attempts,
            ..self
        }
    }

    /// Attach the digest of the output file.
    pub fn with_digest(self, digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            ..self
        }
    }

    /// Get the path of the output file.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Get the size of the download.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the number of chunks fetched.
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// Get the number of failed chunk attempts.
    pub fn failed_attempts(&self) -> usize {
        self.failed_attempts
    }

    /// Get the hex digest of the output file.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}
