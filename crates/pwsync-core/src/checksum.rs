//! Digest computation and verification for downloaded artifacts.
//!
//! Only `sha1` is accepted. Tokens are matched against a closed set so an
//! unknown `hash-format` fails immediately instead of being skipped.

use anyhow::{Context, Result};
use sha1::{Digest, Sha1};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const BUF_SIZE: usize = 64 * 1024;

/// Digest algorithm named by a manifest's `hash-format` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFormat {
    Sha1,
}

impl HashFormat {
    /// Token as it appears in manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashFormat::Sha1 => "sha1",
        }
    }
}

impl fmt::Display for HashFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The manifest named a digest algorithm that is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported hash type: {0}")]
pub struct UnsupportedAlgorithm(pub String);

impl FromStr for HashFormat {
    type Err = UnsupportedAlgorithm;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "sha1" => Ok(HashFormat::Sha1),
            other => Err(UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Failure of [`verify`]: either the algorithm is unknown or the digest differs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedAlgorithm),
    #[error("hash mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}

/// Digest `data` under the algorithm named by `algorithm` and return lowercase hex.
pub fn digest(data: &[u8], algorithm: &str) -> Result<String, UnsupportedAlgorithm> {
    let format: HashFormat = algorithm.parse()?;
    Ok(digest_with(data, format))
}

/// Digest `data` with an already-parsed algorithm.
pub fn digest_with(data: &[u8], format: HashFormat) -> String {
    match format {
        HashFormat::Sha1 => hex::encode(Sha1::digest(data)),
    }
}

/// Check that `data` hashes to `expected` under `algorithm`.
/// The comparison is exact: `expected` must already be lowercase hex.
pub fn verify(data: &[u8], algorithm: &str, expected: &str) -> Result<(), VerifyError> {
    let actual = digest(data, algorithm)?;
    if actual != expected {
        return Err(VerifyError::Mismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

/// Compute SHA-1 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded; used when authoring manifests.
pub fn sha1_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
