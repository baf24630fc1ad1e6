//! Sequential driver: resolve every record once, report each outcome.

use crate::fetch::{self, FetchError, FetchOptions, Outcome};
use crate::manifest::ManifestRecord;
use crate::transport::Transport;
use std::path::Path;

/// Outcome counts for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub skipped: usize,
    pub fetched: usize,
    pub failed: usize,
}

impl SyncSummary {
    pub fn total(&self) -> usize {
        self.skipped + self.fetched + self.failed
    }

    fn record(&mut self, result: &Result<Outcome, FetchError>) {
        match result {
            Ok(Outcome::Skipped) => self.skipped += 1,
            Ok(Outcome::Fetched { .. }) => self.fetched += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Creates the artifact directory if missing. Not fatal: if this fails,
/// every record will report its own write error.
pub fn prepare_target_dir(dir: &Path) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), "cannot create target directory: {}", e);
    }
}

/// Resolves `records` one at a time in the given order.
///
/// `report` is called exactly once per record with its result. A failure
/// never stops the pass; the next record is processed regardless.
pub fn run<T, F>(
    records: &[ManifestRecord],
    target_dir: &Path,
    transport: &T,
    options: &FetchOptions,
    mut report: F,
) -> SyncSummary
where
    T: Transport + ?Sized,
    F: FnMut(&ManifestRecord, &Result<Outcome, FetchError>),
{
    let mut summary = SyncSummary::default();
    for record in records {
        let result = fetch::resolve(record, target_dir, transport, options);
        if let Err(e) = &result {
            tracing::error!(
                name = %record.name,
                integrity = e.is_integrity(),
                "fetch failed: {}",
                e
            );
        }
        summary.record(&result);
        report(record, &result);
    }
    tracing::info!(
        total = summary.total(),
        skipped = summary.skipped,
        fetched = summary.fetched,
        failed = summary.failed,
        "sync finished"
    );
    summary
}
