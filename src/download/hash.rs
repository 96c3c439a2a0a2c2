//! Integrity verification for completed downloads.
//!
//! The completed file is streamed through SHA-256 in fixed-size blocks and
//! rendered as 64 lowercase hex characters.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::download::hash::{digest_matches, sha256_file};
//! use std::path::PathBuf;
//!
//! # async fn example() -> rangefetch::Result<()> {
//! let file_path = PathBuf::from("downloaded.bin");
//! let digest = sha256_file(&file_path).await?;
//! println!("SHA-256: {}", digest);
//!
//! let expected = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
//! if !digest_matches(&digest, expected) {
//!     println!("Hash verification failed!");
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};

use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Size of the blocks read from disk while hashing.
const BUFFER_SIZE: usize = 8192;

/// Length of a hex-rendered SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Compute the SHA-256 digest of the file at `path` as lowercase hex.
pub async fn sha256_file(path: &Path) -> Result<String> {
    let read_error = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).await.map_err(read_error)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];

    loop {
        let n = file.read(&mut buffer).await.map_err(read_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Whether `hash` looks like a hex-rendered SHA-256 digest.
pub fn is_sha256_hex(hash: &str) -> bool {
    hash.len() == SHA256_HEX_LEN && hash.chars().all(|c| c.is_ascii_hexdigit())
}

/// Compare a computed digest with an expected one, ignoring case.
///
/// An expected value that is not a SHA-256 digest never matches.
pub fn digest_matches(actual: &str, expected: &str) -> bool {
    is_sha256_hex(expected) && actual.eq_ignore_ascii_case(expected)
}
