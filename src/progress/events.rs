//! Progress events emitted while a download runs.

use crate::download::FetchRange;
use crate::downloader::Phase;

use std::fmt;

/// Callback type for progress events.
pub type ProgressCallback = Box<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Something worth reporting happened during a download.
///
/// Every event renders as a single human-readable line through
/// [`fmt::Display`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The downloader entered a new phase.
    Phase(Phase),
    /// The size probe succeeded.
    Probed { total: u64 },
    /// Bytes were written and marked complete. `range` covers the bytes
    /// written, which may differ from the range that was requested.
    Chunk {
        range: FetchRange,
        received: u64,
        total: u64,
    },
    /// A chunk fetch failed; the range stays open and will be fetched again.
    ChunkFailed {
        range: FetchRange,
        attempt: u32,
        error: String,
    },
}

impl ProgressEvent {
    /// Completion percentage for [`ProgressEvent::Chunk`] events.
    ///
    /// An empty download counts as fully complete.
    pub fn percent(&self) -> Option<f64> {
        match self {
            ProgressEvent::Chunk {
                received, total, ..
            } => Some(percent(*received, *total)),
            _ => None,
        }
    }
}

/// Share of `total` represented by `received`, in percent.
pub fn percent(received: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        received as f64 * 100.0 / total as f64
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Phase(phase) => write!(f, "{}", phase),
            ProgressEvent::Probed { total } => write!(f, "Total size: {} bytes", total),
            ProgressEvent::Chunk {
                received, total, ..
            } => write!(
                f,
                "Downloaded {} / {} bytes ({:.2}%)",
                received,
                total,
                percent(*received, *total)
            ),
            ProgressEvent::ChunkFailed {
                range,
                attempt,
                error,
            } => write!(
                f,
                "Error downloading chunk [{}] (attempt {}): {}",
                range.to_header_value(),
                attempt,
                error
            ),
        }
    }
}
