//! Transfer plan and the transient values that flow through the loop.
//!
//! All byte ranges inside the crate are half-open: a [`FetchRange`] covers
//! `start..end`. Only the HTTP layer converts them to the inclusive form used
//! by the `Range` header, through [`FetchRange::to_header_value`].

use std::fmt;

/// Immutable description of one download: how many bytes there are and how
/// many to ask for at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    total_size: u64,
    chunk_size: u64,
}

impl TransferPlan {
    /// Creates a new [`TransferPlan`].
    ///
    /// A `chunk_size` of zero would never make progress, so it is raised to one
    /// byte.
    pub fn new(total_size: u64, chunk_size: u64) -> Self {
        Self {
            total_size,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Get the total size of the resource in bytes.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Get the maximum number of bytes requested per chunk.
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }
}

/// A half-open byte range `[start, end)` to request from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchRange {
    /// First byte offset included in the range.
    pub start: u64,
    /// First byte offset after the range.
    pub end: u64,
}

impl FetchRange {
    /// Creates a new [`FetchRange`].
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered by the range.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no byte at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the range as the value of an HTTP `Range` header.
    ///
    /// HTTP byte ranges are inclusive on both ends, so `[0, 1024)` becomes
    /// `bytes=0-1023`.
    ///
    /// ```rust
    /// use rangefetch::download::FetchRange;
    ///
    /// assert_eq!(FetchRange::new(0, 1024).to_header_value(), "bytes=0-1023");
    /// ```
    pub fn to_header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end.saturating_sub(1))
    }
}

impl fmt::Display for FetchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Bytes received for one chunk, together with the absolute offset they
/// belong at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkResult {
    /// Absolute offset of the first byte.
    pub offset: u64,
    /// The received bytes.
    pub bytes: Vec<u8>,
}

impl ChunkResult {
    /// Creates a new [`ChunkResult`].
    pub fn new(offset: u64, bytes: Vec<u8>) -> Self {
        Self { offset, bytes }
    }

    /// Number of bytes in the chunk.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the chunk carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
