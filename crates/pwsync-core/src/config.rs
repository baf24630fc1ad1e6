use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::manifest::PACK_MODS_SUBDIR;
use crate::transport::CurlOptions;

/// Where manifests live relative to `pack_dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestLayout {
    /// `pack_dir` is a packwiz pack root; manifests are under `pack_dir/mods`.
    #[default]
    Pack,
    /// `pack_dir` itself holds the `.pw.toml` files.
    Flat,
}

impl ManifestLayout {
    /// Directory to scan for manifests given the configured source path.
    pub fn manifest_dir(self, source: &Path) -> PathBuf {
        match self {
            ManifestLayout::Pack => source.join(PACK_MODS_SUBDIR),
            ManifestLayout::Flat => source.to_path_buf(),
        }
    }
}

/// HTTP transport settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds (None = no limit).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User-Agent sent with downloads.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl HttpConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Global configuration loaded from `~/.config/pwsync/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwsyncConfig {
    /// Modpack root (or manifest directory when `layout = "flat"`).
    #[serde(default = "default_pack_dir")]
    pub pack_dir: PathBuf,
    /// How to find manifests under `pack_dir`.
    #[serde(default)]
    pub layout: ManifestLayout,
    /// Directory that receives the downloaded jars.
    #[serde(default = "default_mods_dir")]
    pub mods_dir: PathBuf,
    /// Optional pause after each written file, in milliseconds (None = no pause).
    #[serde(default)]
    pub post_write_delay_ms: Option<u64>,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_pack_dir() -> PathBuf {
    PathBuf::from("./modpack")
}

fn default_mods_dir() -> PathBuf {
    PathBuf::from("./mods")
}

impl Default for PwsyncConfig {
    fn default() -> Self {
        Self {
            pack_dir: default_pack_dir(),
            layout: ManifestLayout::Pack,
            mods_dir: default_mods_dir(),
            post_write_delay_ms: None,
            http: HttpConfig::default(),
        }
    }
}

impl PwsyncConfig {
    /// Directory the loader should scan.
    pub fn manifest_dir(&self) -> PathBuf {
        self.layout.manifest_dir(&self.pack_dir)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            post_write_delay: self
                .post_write_delay_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pwsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PwsyncConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<PwsyncConfig> {
    if !path.exists() {
        let default_cfg = PwsyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: PwsyncConfig = toml::from_str(&data)?;
    Ok(cfg)
}
