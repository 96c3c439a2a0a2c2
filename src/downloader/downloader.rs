//! Core downloader implementation with the chunk loop.
//!
//! A download moves through [`Phase::Probing`], [`Phase::Looping`] and
//! [`Phase::Verifying`] to [`Phase::Done`], or ends in [`Phase::Aborted`].
//! While looping, the downloader repeatedly asks the [`RangeTracker`] for the
//! first missing range, fetches it, writes it and marks it complete. A failed
//! fetch leaves the range missing, so the next pass selects it again; a
//! backoff policy spaces out those attempts and ends the download once a
//! range has used up its retries.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! # async fn example() -> rangefetch::Result<()> {
//! let downloader = DownloaderBuilder::new()
//!     .url("http://127.0.0.1:8080")
//!     .output(PathBuf::from("downloaded.bin"))
//!     .build();
//!
//! let summary = downloader.download().await?;
//! println!("SHA-256: {}", summary.digest());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::download::{hash, FetchRange, OutputSink, RangeTracker, Summary, TransferPlan};
use crate::error::{Error, Result};
use crate::http::{HttpSource, RangeSource};
use crate::progress::{ProgressDisplay, ProgressEvent};

use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{RetryDecision, RetryPolicy};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// The phases of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Learning the total size.
    Probing,
    /// Fetching missing ranges.
    Looping,
    /// Hashing the completed file.
    Verifying,
    /// The download completed.
    Done,
    /// The download stopped on a fatal error.
    Aborted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Probing => "Probing size",
            Phase::Looping => "Downloading",
            Phase::Verifying => "Verifying",
            Phase::Done => "Download complete",
            Phase::Aborted => "Download aborted",
        };
        f.write_str(s)
    }
}

/// Consecutive failures of the range starting at one offset.
#[derive(Debug, Clone, Copy)]
struct Failures {
    attempts: u32,
    first_failure: SystemTime,
}

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use rangefetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the endpoint.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Gets the output path.
    pub fn output(&self) -> &PathBuf {
        &self.config.output
    }

    /// Gets the chunk size in bytes.
    pub fn chunk_size(&self) -> u64 {
        self.config.chunk_size
    }

    /// Gets the number of retries per range.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the expected digest, if any.
    pub fn expected_sha256(&self) -> Option<&str> {
        self.config.expected_sha256.as_deref()
    }

    /// Download the configured endpoint over HTTP.
    pub async fn download(&self) -> Result<Summary> {
        let source = HttpSource::new(&self.config.url, self.config.http_client_config())?;
        self.download_from(&source).await
    }

    /// Download from any [`RangeSource`].
    pub async fn download_from<S>(&self, source: &S) -> Result<Summary>
    where
        S: RangeSource + ?Sized,
    {
        let display = ProgressDisplay::new(self.config.progress_bar.clone());

        let result = self.run(source, &display).await;
        match &result {
            Ok(summary) => {
                display.finish();
                self.enter(Phase::Done);
                info!(
                    "Downloaded {} bytes to {:?}, SHA-256 {}",
                    summary.size(),
                    summary.output(),
                    summary.digest()
                );
            }
            Err(e) => {
                display.abandon();
                self.enter(Phase::Aborted);
                warn!("Download aborted: {}", e);
            }
        }
        result
    }

    async fn run<S>(&self, source: &S, display: &ProgressDisplay) -> Result<Summary>
    where
        S: RangeSource + ?Sized,
    {
        self.enter(Phase::Probing);
        let total_size = source.probe().await?;
        let plan = TransferPlan::new(total_size, self.config.chunk_size);
        self.report(&ProgressEvent::Probed { total: total_size });
        display.set_total(total_size);

        let mut tracker = RangeTracker::new(plan)?;
        let mut sink = OutputSink::create(&self.config.output, total_size).await?;

        self.enter(Phase::Looping);
        let counters = match self.fill(source, &mut tracker, &mut sink, display).await {
            Ok(counters) => counters,
            Err(e) => {
                if let Err(close_err) = sink.close().await {
                    warn!("Failed to close output after abort: {}", close_err);
                }
                return Err(e);
            }
        };

        self.enter(Phase::Verifying);
        sink.close().await?;
        let digest = hash::sha256_file(&self.config.output).await?;
        if let Some(expected) = self.config.expected_sha256.as_deref() {
            if !hash::digest_matches(&digest, expected) {
                return Err(Error::HashMismatch {
                    expected: expected.to_string(),
                    actual: digest,
                });
            }
        }

        let (chunks, failed_attempts) = counters;
        Ok(Summary::new(self.config.output.clone(), total_size)
            .with_chunks(chunks, failed_attempts)
            .with_digest(digest))
    }

    /// Fetch missing ranges until the tracker reports none left.
    ///
    /// Returns the number of chunks written and of failed attempts.
    async fn fill<S>(
        &self,
        source: &S,
        tracker: &mut RangeTracker,
        sink: &mut OutputSink,
        display: &ProgressDisplay,
    ) -> Result<(usize, usize)>
    where
        S: RangeSource + ?Sized,
    {
        let policy = ExponentialBackoff::builder()
            .retry_bounds(
                self.config.min_retry_interval,
                self.config.max_retry_interval.max(self.config.min_retry_interval),
            )
            .build_with_max_retries(self.config.retries);

        let total = tracker.total_size();
        let mut received = 0u64;
        let mut chunks = 0usize;
        let mut failed_attempts = 0usize;
        let mut failures: HashMap<u64, Failures> = HashMap::new();

        while let Some(gap) = tracker.next_gap() {
            let error = match source.fetch(gap).await {
                Ok(chunk) => {
                    let written = sink.write_at(chunk.offset, &chunk.bytes).await?;
                    let newly_completed = tracker.mark_complete(chunk.offset, written);
                    if newly_completed > 0 {
                        received += newly_completed;
                        display.set_received(received);
                        self.report(&ProgressEvent::Chunk {
                            range: FetchRange::new(chunk.offset, chunk.offset + written),
                            received,
                            total,
                        });
                    }

                    if tracker.is_marked(gap.start) {
                        failures.remove(&gap.start);
                        chunks += 1;
                        continue;
                    }

                    debug!(
                        "Chunk at offset {} ({} bytes) did not cover {}",
                        chunk.offset,
                        chunk.len(),
                        gap
                    );
                    Error::EmptyChunk { range: gap }
                }
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            failed_attempts += 1;
            let entry = failures.entry(gap.start).or_insert(Failures {
                attempts: 0,
                first_failure: SystemTime::now(),
            });
            entry.attempts += 1;
            let attempts = entry.attempts;

            warn!("Chunk {} failed (attempt {}): {}", gap, attempts, error);
            self.report(&ProgressEvent::ChunkFailed {
                range: gap,
                attempt: attempts,
                error: error.to_string(),
            });

            self.backoff(&policy, gap, *entry).await?;
        }

        Ok((chunks, failed_attempts))
    }

    /// Wait before the failed `range` is selected again, or give up on it.
    async fn backoff(
        &self,
        policy: &ExponentialBackoff,
        range: FetchRange,
        failures: Failures,
    ) -> Result<()> {
        match policy.should_retry(failures.first_failure, failures.attempts - 1) {
            RetryDecision::Retry { execute_after } => {
                let wait = execute_after
                    .duration_since(SystemTime::now())
                    .unwrap_or_default();
                debug!("Retrying {} in {:?}", range, wait);
                tokio::time::sleep(wait).await;
                Ok(())
            }
            RetryDecision::DoNotRetry => Err(Error::RetryExhausted {
                range,
                attempts: failures.attempts,
            }),
        }
    }

    fn enter(&self, phase: Phase) {
        debug!("Entering phase {:?}", phase);
        self.report(&ProgressEvent::Phase(phase));
    }

    fn report(&self, event: &ProgressEvent) {
        if let Some(ref callback) = self.config.on_progress {
            callback(event);
        }
    }
}
