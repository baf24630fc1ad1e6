//! Artifact fetcher: presence check, download, verify, write.
//!
//! Each record moves through a linear sequence of steps with no retries:
//! target path → presence check → GET → digest check → atomic write.
//! The first failing step is terminal for that record and nothing is left on
//! disk under the artifact name.

mod error;

pub use error::FetchError;

use crate::checksum::{self, VerifyError};
use crate::manifest::ManifestRecord;
use crate::storage;
use crate::transport::Transport;
use std::path::Path;
use std::time::Duration;

/// `Accept` header value sent with every artifact request.
pub const ACCEPT_OCTET_STREAM: &str = "application/octet-stream";

/// Terminal success states of [`resolve`]. Failures are `Err(FetchError)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Target file already existed; no request was made.
    Skipped,
    /// Downloaded, verified and written.
    Fetched { bytes: usize },
}

/// Behavior knobs for [`resolve`] that do not affect correctness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Pause after each successful write to go easy on the remote host.
    pub post_write_delay: Option<Duration>,
}

/// Resolves one record into `target_dir`.
///
/// Presence of the target file, whatever its content, counts as satisfied;
/// existing files are never re-hashed. Freshly downloaded bytes are verified
/// before anything touches the disk.
pub fn resolve<T: Transport + ?Sized>(
    record: &ManifestRecord,
    target_dir: &Path,
    transport: &T,
    options: &FetchOptions,
) -> Result<Outcome, FetchError> {
    let target = storage::artifact_path(target_dir, &record.filename)?;

    if target.exists() {
        tracing::info!(name = %record.name, path = %target.display(), "already present, skipping");
        return Ok(Outcome::Skipped);
    }

    let url = &record.download.url;
    check_url(url)?;

    tracing::debug!(name = %record.name, url = %url, "downloading");
    let response = transport
        .get(url, &[("Accept", ACCEPT_OCTET_STREAM)])
        .map_err(|source| FetchError::Network {
            url: url.clone(),
            source,
        })?;
    if response.status != 200 {
        tracing::warn!(name = %record.name, status = response.status, "unexpected HTTP status");
        return Err(FetchError::HttpStatus(response.status));
    }
    let body = response.body;

    verify_body(&body, record)?;

    storage::write_atomic(&target, &body).map_err(|source| FetchError::Io {
        path: target.clone(),
        source,
    })?;
    tracing::info!(name = %record.name, path = %target.display(), bytes = body.len(), "artifact written");

    if let Some(delay) = options.post_write_delay {
        std::thread::sleep(delay);
    }

    Ok(Outcome::Fetched { bytes: body.len() })
}

fn check_url(raw: &str) -> Result<(), FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

fn verify_body(body: &[u8], record: &ManifestRecord) -> Result<(), FetchError> {
    match checksum::verify(body, &record.download.hash_format, &record.download.hash) {
        Ok(()) => Ok(()),
        Err(VerifyError::Mismatch { expected, actual }) => {
            tracing::warn!(name = %record.name, %expected, %actual, "digest mismatch, discarding body");
            Err(FetchError::Integrity { expected, actual })
        }
        Err(VerifyError::Unsupported(e)) => Err(e.into()),
    }
}
