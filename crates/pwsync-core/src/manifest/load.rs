//! Directory scan and TOML parsing.

use super::{ManifestRecord, MANIFEST_SUFFIX};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Manifest loading failure. Any one of these aborts the whole load.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseFailure,
    },
}

/// What was wrong with a manifest's content.
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error("not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> ManifestError {
    let path = path.to_path_buf();
    move |source| ManifestError::Io { path, source }
}

/// Parse the text of one manifest file.
pub fn parse_manifest(text: &str) -> Result<ManifestRecord, toml::de::Error> {
    toml::from_str(text)
}

/// Loads every `.pw.toml` file directly under `dir` (non-recursive).
///
/// Records come back in directory listing order. Other entries are ignored.
/// One unreadable or malformed manifest fails the whole load; callers never
/// see a partial list.
pub fn load_manifests(dir: &Path) -> Result<Vec<ManifestRecord>, ManifestError> {
    let entries = fs::read_dir(dir).map_err(io_err(dir))?;
    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(io_err(dir))?;
        let file_name = entry.file_name();
        let is_manifest = file_name
            .to_str()
            .map(|n| n.ends_with(MANIFEST_SUFFIX))
            .unwrap_or(false);
        if !is_manifest {
            continue;
        }

        let path = entry.path();
        let bytes = fs::read(&path).map_err(io_err(&path))?;
        let record = String::from_utf8(bytes)
            .map_err(ParseFailure::from)
            .and_then(|text| parse_manifest(&text).map_err(ParseFailure::from))
            .map_err(|source| ManifestError::Parse {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), name = %record.name, "loaded manifest");
        records.push(record);
    }

    tracing::info!(dir = %dir.display(), count = records.len(), "manifests loaded");
    Ok(records)
}
