//! Error handling for the rangefetch library.
//!
//! Every failure the download pipeline can produce is a variant of [`Error`].
//! Some of them are only fatal in certain phases: a connection failure while
//! probing the size aborts the run, while the same failure on a single chunk
//! leaves the gap open so it is selected again. [`Error::is_retryable`]
//! encodes that split.

use crate::download::FetchRange;

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen when using rangefetch.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Used when the HTTP client cannot be constructed.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The endpoint could not be parsed as a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The host could not be resolved, the connection could not be
    /// established, or it broke while the body was being read.
    #[error("Connection error")]
    Connection {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The server answered with a status code that is not acceptable for the
    /// request that was made.
    #[error("Server error: unexpected status {status}")]
    Server { status: StatusCode },

    /// The server answered with a success status but sent no bytes that
    /// advance the requested range.
    #[error("Server returned no usable bytes for range {range}")]
    EmptyChunk { range: FetchRange },

    /// The size probe did not yield a usable `Content-Length`.
    #[error("Size unavailable: {0}")]
    SizeUnavailable(String),

    /// The reported size is too large to track in memory.
    #[error("Resource of {size} bytes is too large to download")]
    TooLarge { size: u64 },

    /// The output file could not be created, resized or written.
    #[error("Write error at offset {offset}")]
    Write {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The completed output file could not be read back for hashing.
    #[error("Read error on {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A gap kept failing until the retry budget ran out.
    #[error("Retry budget exhausted for range {range} after {attempts} attempts")]
    RetryExhausted { range: FetchRange, attempts: u32 },

    /// The completed file does not have the expected digest.
    #[error("Hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },
}

impl Error {
    /// Whether a failure on a single chunk fetch leaves the transfer
    /// recoverable by fetching the same gap again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Connection { .. } | Error::Server { .. } | Error::EmptyChunk { .. }
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Connection {
            source: reqwest_middleware::Error::Reqwest(source),
        }
    }
}

/// Result type alias for operations that can fail with a rangefetch error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_errors_are_retryable() {
        let server = Error::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(server.is_retryable());

        let empty = Error::EmptyChunk {
            range: FetchRange::new(0, 10),
        };
        assert!(empty.is_retryable());
    }

    #[test]
    fn test_local_errors_are_fatal() {
        let write = Error::Write {
            offset: 42,
            source: io::Error::other("disk full"),
        };
        assert!(!write.is_retryable());

        let exhausted = Error::RetryExhausted {
            range: FetchRange::new(0, 10),
            attempts: 3,
        };
        assert!(!exhausted.is_retryable());
        assert!(!Error::SizeUnavailable("missing".into()).is_retryable());
        assert!(!Error::TooLarge { size: u64::MAX }.is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let server = Error::Server {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            server.to_string(),
            "Server error: unexpected status 404 Not Found"
        );

        let exhausted = Error::RetryExhausted {
            range: FetchRange::new(1024, 2048),
            attempts: 4,
        };
        assert_eq!(
            exhausted.to_string(),
            "Retry budget exhausted for range [1024, 2048) after 4 attempts"
        );
    }
}
