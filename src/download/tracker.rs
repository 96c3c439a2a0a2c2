//! Per-byte completion tracking.
//!
//! [`RangeTracker`] keeps one flag per byte of the resource and answers
//! which range should be fetched next. The scan always restarts at offset
//! zero, so a gap whose fetch failed is selected again on the next call; the
//! downloader relies on this instead of remembering failed ranges.
//!
//! The scan is linear in the size of the resource. Files measured in
//! megabytes are fine; an interval representation would be needed to make
//! this sub-linear. The flags are allocated up front, so a total size that
//! does not fit in memory is refused with [`Error::TooLarge`].

use super::plan::{FetchRange, TransferPlan};
use crate::error::{Error, Result};

/// Tracks which byte offsets of the output have been written.
#[derive(Debug, Clone)]
pub struct RangeTracker {
    plan: TransferPlan,
    completed: Vec<bool>,
}

impl RangeTracker {
    /// Creates a tracker with every byte marked as missing.
    ///
    /// Fails with [`Error::TooLarge`] when the flags for `plan.total_size()`
    /// bytes cannot be addressed or allocated.
    pub fn new(plan: TransferPlan) -> Result<Self> {
        let too_large = || Error::TooLarge {
            size: plan.total_size(),
        };
        let len = usize::try_from(plan.total_size()).map_err(|_| too_large())?;

        let mut completed = Vec::new();
        completed.try_reserve_exact(len).map_err(|_| too_large())?;
        completed.resize(len, false);

        Ok(Self { plan, completed })
    }

    /// Get the total size covered by the tracker.
    pub fn total_size(&self) -> u64 {
        self.plan.total_size()
    }

    /// Return the next range to fetch, or `None` once every byte is complete.
    ///
    /// The range starts at the first missing byte and grows while bytes are
    /// missing, up to the plan's chunk size and never past the total size.
    ///
    /// ```rust
    /// use rangefetch::download::{RangeTracker, TransferPlan, FetchRange};
    ///
    /// let mut tracker = RangeTracker::new(TransferPlan::new(10, 4)).unwrap();
    /// assert_eq!(tracker.next_gap(), Some(FetchRange::new(0, 4)));
    /// tracker.mark_complete(0, 4);
    /// assert_eq!(tracker.next_gap(), Some(FetchRange::new(4, 8)));
    /// ```
    pub fn next_gap(&self) -> Option<FetchRange> {
        let start = self.completed.iter().position(|done| !done)?;
        let chunk_size = usize::try_from(self.plan.chunk_size()).unwrap_or(usize::MAX);
        let limit = self.completed.len().min(start.saturating_add(chunk_size));
        let end = self.completed[start..limit]
            .iter()
            .position(|done| *done)
            .map_or(limit, |len| start + len);

        Some(FetchRange::new(start as u64, end as u64))
    }

    /// Mark `[offset, offset + length)` as complete and return how many bytes
    /// were not complete before.
    ///
    /// Offsets at or beyond the total size are ignored, so a server that sends
    /// more than requested cannot grow the state. Marking twice is a no-op.
    pub fn mark_complete(&mut self, offset: u64, length: u64) -> u64 {
        let total = self.plan.total_size();
        let start = offset.min(total) as usize;
        let end = offset.saturating_add(length).min(total) as usize;

        let mut newly_completed = 0;
        for done in &mut self.completed[start..end] {
            if !*done {
                *done = true;
                newly_completed += 1;
            }
        }
        newly_completed
    }

    /// Whether the byte at `offset` has been written.
    pub fn is_marked(&self, offset: u64) -> bool {
        self.completed
            .get(offset as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Number of bytes marked complete.
    pub fn completed_bytes(&self) -> u64 {
        self.completed.iter().filter(|done| **done).count() as u64
    }

    /// Whether every byte has been written.
    pub fn is_complete(&self) -> bool {
        self.completed.iter().all(|done| *done)
    }
}
