//! Typed shape of a single `.pw.toml` manifest.

use serde::Deserialize;

/// One declared artifact. Fields missing from the file are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ManifestRecord {
    /// Display name used in outcome lines.
    pub name: String,
    /// Target file name inside the mods directory.
    pub filename: String,
    /// Client/server applicability. Carried, never enforced.
    pub side: String,
    pub download: DownloadSpec,
}

/// The `[download]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DownloadSpec {
    pub url: String,
    /// Expected digest, lowercase hex.
    pub hash: String,
    /// Digest algorithm token, e.g. `sha1`.
    #[serde(rename = "hash-format")]
    pub hash_format: String,
}
