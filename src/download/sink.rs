//! Pre-sized output file with positioned writes.

use crate::error::{Error, Result};

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

/// The destination file of a download.
///
/// The file is resized to its final length on creation, so chunks can be
/// written at any offset in any order.
#[derive(Debug)]
pub struct OutputSink {
    file: File,
    path: PathBuf,
    total_size: u64,
}

impl OutputSink {
    /// Create (or truncate) the file at `path` and resize it to `total_size`.
    pub async fn create(path: &Path, total_size: u64) -> Result<Self> {
        let write_error = |source| Error::Write { offset: 0, source };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            debug!("Creating destination directory {:?}", dir);
            fs::create_dir_all(dir).await.map_err(write_error)?;
        }

        debug!("Creating destination file {:?} ({} bytes)", path, total_size);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await
            .map_err(write_error)?;
        file.set_len(total_size).await.map_err(write_error)?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            total_size,
        })
    }

    /// Write `bytes` at `offset`, dropping anything past the end of the file.
    ///
    /// Returns the number of bytes actually written.
    pub async fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<u64> {
        let available = self.total_size.saturating_sub(offset);
        let len = available.min(bytes.len() as u64);
        if len == 0 {
            return Ok(0);
        }

        let write_error = |source| Error::Write { offset, source };
        self.file
            .seek(SeekFrom::Start(offset))
            .await
            .map_err(write_error)?;
        self.file
            .write_all(&bytes[..len as usize])
            .await
            .map_err(write_error)?;

        Ok(len)
    }

    /// Flush and sync the file. Consumes the sink.
    pub async fn close(mut self) -> Result<()> {
        let write_error = |source| Error::Write {
            offset: self.total_size,
            source,
        };
        self.file.flush().await.map_err(write_error)?;
        self.file.sync_all().await.map_err(write_error)?;
        debug!("Closed {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_presizes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.bin");

        let sink = OutputSink::create(&path, 4096).await.unwrap();
        sink.close().await.unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 4096);
    }

    #[tokio::test]
    async fn test_out_of_order_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        let mut sink = OutputSink::create(&path, 6).await.unwrap();
        assert_eq!(sink.write_at(3, b"def").await.unwrap(), 3);
        assert_eq!(sink.write_at(0, b"abc").await.unwrap(), 3);
        sink.close().await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"abcdef");
    }

    #[tokio::test]
    async fn test_write_never_grows_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        let mut sink = OutputSink::create(&path, 4).await.unwrap();
        assert_eq!(sink.write_at(2, b"xyz!").await.unwrap(), 2);
        assert_eq!(sink.write_at(9, b"ignored").await.unwrap(), 0);
        sink.close().await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\0\0xy");
    }

    #[tokio::test]
    async fn test_create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, vec![7u8; 100]).unwrap();

        let sink = OutputSink::create(&path, 10).await.unwrap();
        sink.close().await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![0u8; 10]);
    }
}
