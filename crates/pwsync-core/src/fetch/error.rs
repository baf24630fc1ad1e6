//! Per-record failure taxonomy.

use crate::checksum::UnsupportedAlgorithm;
use crate::storage::InvalidFilename;
use crate::transport::TransportError;
use std::io;
use std::path::PathBuf;

/// Why a single record failed. Terminal for that record only.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    InvalidFilename(#[from] InvalidFilename),
    /// `download.url` is not an absolute http(s) URL.
    #[error("invalid download url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// DNS, connect, TLS or timeout failure below HTTP.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: TransportError,
    },
    /// Server answered with something other than 200.
    #[error("server returned HTTP {0}")]
    HttpStatus(u32),
    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnsupportedAlgorithm),
    /// Downloaded bytes do not hash to the declared digest.
    #[error("hash mismatch: expected {expected}, got {actual}")]
    Integrity { expected: String, actual: String },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// True when the server was reached but the content or its declaration was wrong.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            FetchError::Integrity { .. } | FetchError::UnsupportedAlgorithm(_)
        )
    }
}
