//! `pwsync list` – show manifests and whether their files are present.

use anyhow::{Context, Result};
use pwsync_core::config::PwsyncConfig;
use pwsync_core::manifest::{self, ManifestRecord};
use pwsync_core::storage;
use std::path::Path;

use crate::cli::SourceArgs;

pub fn run_list(cfg: &PwsyncConfig, source: &SourceArgs) -> Result<()> {
    let manifest_dir = source.manifest_dir(cfg);
    let target_dir = source.target_dir(cfg);
    let records = manifest::load_manifests(&manifest_dir)
        .with_context(|| format!("cannot load manifests from {}", manifest_dir.display()))?;

    if records.is_empty() {
        println!("No manifests in {}.", manifest_dir.display());
        return Ok(());
    }
    println!("{HEADER}");
    for record in &records {
        println!("{}", list_line(record, &target_dir));
    }
    Ok(())
}

const HEADER: &str = "STATE     SIDE     NAME                             FILENAME";

fn state(record: &ManifestRecord, target_dir: &Path) -> &'static str {
    match storage::artifact_path(target_dir, &record.filename) {
        Ok(path) if path.exists() => "present",
        Ok(_) => "missing",
        Err(_) => "invalid",
    }
}

fn list_line(record: &ManifestRecord, target_dir: &Path) -> String {
    let side = if record.side.is_empty() { "-" } else { record.side.as_str() };
    format!(
        "{:<9} {:<8} {:<32} {}",
        state(record, target_dir),
        side,
        record.name,
        record.filename
    )
}
