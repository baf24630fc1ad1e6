//! Packwiz manifest loading.
//!
//! A modpack keeps one `.pw.toml` file per mod. Each file declares where the
//! jar comes from and the digest it must have once downloaded.

mod load;
mod record;

pub use load::{load_manifests, parse_manifest, ManifestError, ParseFailure};
pub use record::{DownloadSpec, ManifestRecord};

/// File name suffix that marks a packwiz manifest.
pub const MANIFEST_SUFFIX: &str = ".pw.toml";

/// Subdirectory of a packwiz pack root that holds mod manifests.
pub const PACK_MODS_SUBDIR: &str = "mods";
