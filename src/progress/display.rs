//! Byte-level progress bar for a single download.

use crate::progress::ProgressBarOpts;
use indicatif::ProgressBar;

/// Progress display for one download.
///
/// The bar is created with an unknown length and sized once the total is
/// known from the size probe.
pub struct ProgressDisplay {
    bar: ProgressBar,
    opts: ProgressBarOpts,
}

impl ProgressDisplay {
    /// Create a new progress display.
    pub fn new(opts: ProgressBarOpts) -> Self {
        let bar = opts.clone().to_progress_bar(0);
        Self { bar, opts }
    }

    #[cfg(test)]
    fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Set the total number of bytes.
    pub fn set_total(&self, total: u64) {
        self.bar.set_length(total);
    }

    /// Move the bar to `received` bytes.
    pub fn set_received(&self, received: u64) {
        self.bar.set_position(received);
    }

    /// Finish the bar, clearing or keeping it based on configuration.
    pub fn finish(&self) {
        if self.opts.clear {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish();
        }
    }

    /// Stop the bar after a failed download, leaving it where it stopped.
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
