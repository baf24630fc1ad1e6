//! `pwsync sync` – load manifests and materialize every missing mod.

use anyhow::{Context, Result};
use pwsync_core::config::PwsyncConfig;
use pwsync_core::fetch::{FetchError, Outcome};
use pwsync_core::manifest::{self, ManifestRecord};
use pwsync_core::sync;
use pwsync_core::transport::CurlTransport;
use std::path::Path;
use std::time::Duration;

use crate::cli::SourceArgs;

/// Only a manifest load failure is returned as an error; per-mod failures
/// are printed and the run carries on.
pub fn run_sync(cfg: &PwsyncConfig, source: &SourceArgs, delay_ms: Option<u64>) -> Result<()> {
    let manifest_dir = source.manifest_dir(cfg);
    let target_dir = source.target_dir(cfg);

    let records = manifest::load_manifests(&manifest_dir)
        .with_context(|| format!("cannot load manifests from {}", manifest_dir.display()))?;
    sync::prepare_target_dir(&target_dir);

    let mut options = cfg.fetch_options();
    if let Some(ms) = delay_ms {
        options.post_write_delay = (ms > 0).then(|| Duration::from_millis(ms));
    }
    let transport = CurlTransport::new(cfg.http.curl_options());

    let summary = sync::run(&records, &target_dir, &transport, &options, |record, result| {
        println!("{}", outcome_line(record, &target_dir, result));
    });
    tracing::debug!(?summary, "sync summary");

    println!("Download complete.");
    Ok(())
}

/// The single line printed for one record.
pub(crate) fn outcome_line(
    record: &ManifestRecord,
    target_dir: &Path,
    result: &Result<Outcome, FetchError>,
) -> String {
    match result {
        Ok(Outcome::Skipped) => format!(
            "{} already exists, skipping download.",
            target_dir.join(&record.filename).display()
        ),
        Ok(Outcome::Fetched { .. }) => format!("Downloaded {}", record.name),
        Err(e) => format!("Failed to download {}: {}", record.name, e),
    }
}
