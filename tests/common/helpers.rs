use async_trait::async_trait;
use rand::Rng;
use rangefetch::{
    ChunkResult, DownloaderBuilder, Error, FetchRange, HttpClientConfig, ProgressEvent,
    RangeSource,
};
use reqwest::StatusCode;
use sha2::{Digest, Sha256};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// Common test constants
pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
pub const OUTPUT_NAME: &str = "downloaded.bin";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Creates random test content of specified size
pub fn create_random_content(size: usize) -> Vec<u8> {
    let mut content = vec![0u8; size];
    rand::rng().fill(&mut content[..]);
    content
}

/// Hex SHA-256 of `content`
pub fn sha256_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Asserts that a file has exactly the expected content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let actual = std::fs::read(path).expect("Failed to read output file");
    assert_eq!(actual.len(), expected.len(), "File size mismatch at {:?}", path);
    assert!(actual == expected, "File content mismatch at {:?}", path);
}

/// A downloader builder with hidden progress and fast retries, writing into `dir`
pub fn create_test_downloader_builder(dir: &Path) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .output(dir.join(OUTPUT_NAME))
        .retry_bounds(Duration::from_millis(1), Duration::from_millis(5))
        .timeout(Duration::from_secs(10))
        .no_proxy()
}

/// HTTP client configuration for talking to the local test server
pub fn create_test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        no_proxy: true,
        ..HttpClientConfig::default()
    }
}

/// Collects every progress event a downloader reports.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the log to a builder
    pub fn attach(&self, builder: DownloaderBuilder) -> DownloaderBuilder {
        let events = self.events.clone();
        builder.on_progress(move |event| events.lock().expect("poisoned").push(event.clone()))
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().expect("poisoned").clone()
    }

    /// Ranges of the successfully written chunks
    pub fn chunks(&self) -> Vec<FetchRange> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Chunk { range, .. } => Some(range),
                _ => None,
            })
            .collect()
    }

    /// Ranges of the failed chunk attempts
    pub fn failures(&self) -> Vec<FetchRange> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::ChunkFailed { range, .. } => Some(range),
                _ => None,
            })
            .collect()
    }
}

/// What a [`ScriptedSource`] does for one fetch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Serve the requested range.
    Serve,
    /// Serve the whole content from offset zero, like a server ignoring `Range`.
    ServeFull,
    /// Fail with the given status.
    Status(u16),
    /// Serve nothing.
    Empty,
    /// Serve as many bytes as requested, but taken from and placed at the
    /// given offset.
    ServeAt(u64),
    /// Fail with an error that is not retryable.
    Fatal,
}

/// An in-process [`RangeSource`] following a script of steps.
///
/// Once the script runs out every call is served normally.
pub struct ScriptedSource {
    content: Vec<u8>,
    reported_size: Option<u64>,
    script: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<FetchRange>>,
}

impl ScriptedSource {
    pub fn new(content: Vec<u8>, script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            content,
            reported_size: None,
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Report `size` from the probe instead of the content length
    pub fn with_reported_size(mut self, size: u64) -> Self {
        self.reported_size = Some(size);
        self
    }

    /// Every range requested so far
    pub fn calls(&self) -> Vec<FetchRange> {
        self.calls.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl RangeSource for ScriptedSource {
    async fn probe(&self) -> rangefetch::Result<u64> {
        Ok(self.reported_size.unwrap_or(self.content.len() as u64))
    }

    async fn fetch(&self, range: FetchRange) -> rangefetch::Result<ChunkResult> {
        self.calls.lock().expect("poisoned").push(range);
        let step = self
            .script
            .lock()
            .expect("poisoned")
            .pop_front()
            .unwrap_or(Step::Serve);

        match step {
            Step::Serve => {
                let start = range.start as usize;
                let end = (range.end as usize).min(self.content.len());
                Ok(ChunkResult::new(range.start, self.content[start..end].to_vec()))
            }
            Step::ServeFull => Ok(ChunkResult::new(0, self.content.clone())),
            Step::Status(code) => Err(Error::Server {
                status: StatusCode::from_u16(code).expect("invalid status"),
            }),
            Step::Empty => Ok(ChunkResult::new(range.start, Vec::new())),
            Step::ServeAt(offset) => {
                let start = (offset as usize).min(self.content.len());
                let end = start.saturating_add(range.len() as usize).min(self.content.len());
                Ok(ChunkResult::new(offset, self.content[start..end].to_vec()))
            }
            Step::Fatal => Err(Error::Internal("source went away".to_string())),
        }
    }
}
