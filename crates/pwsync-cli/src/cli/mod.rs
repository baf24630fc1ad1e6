//! CLI for pwsync.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pwsync_core::config::{self, ManifestLayout, PwsyncConfig};
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_list, run_sync};

/// Top-level CLI for pwsync.
#[derive(Debug, Parser)]
#[command(name = "pwsync")]
#[command(about = "pwsync: download and verify the mods declared by a packwiz modpack", long_about = None)]
pub struct Cli {
    /// Config file to use instead of `~/.config/pwsync/config.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every missing mod and verify it against its manifest hash.
    Sync {
        #[command(flatten)]
        source: SourceArgs,

        /// Pause after each downloaded file, in milliseconds (0 disables).
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Show each manifest and whether its file is already present. No network access.
    List {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the SHA-1 of a file, as expected in a manifest's `hash` field.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

/// Where manifests come from and where mods go. Unset values fall back to config.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Packwiz modpack root; manifests are read from its `mods` subdirectory.
    #[arg(long, value_name = "DIR", conflicts_with = "manifests")]
    pub pack: Option<PathBuf>,

    /// Directory holding the `.pw.toml` files directly.
    #[arg(long, value_name = "DIR")]
    pub manifests: Option<PathBuf>,

    /// Directory that receives the mod files.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl SourceArgs {
    pub fn manifest_dir(&self, cfg: &PwsyncConfig) -> PathBuf {
        match (&self.pack, &self.manifests) {
            (Some(pack), _) => ManifestLayout::Pack.manifest_dir(pack),
            (None, Some(dir)) => ManifestLayout::Flat.manifest_dir(dir),
            (None, None) => cfg.manifest_dir(),
        }
    }

    pub fn target_dir(&self, cfg: &PwsyncConfig) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| cfg.mods_dir.clone())
    }
}

/// Loads config; problems with it are reported but never block a run.
fn load_config(explicit: Option<&Path>) -> PwsyncConfig {
    let loaded = match explicit {
        Some(path) => config::load_or_init_at(path),
        None => config::load_or_init(),
    };
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config unavailable, using defaults: {:#}", e);
            eprintln!("warning: config unavailable, using defaults: {:#}", e);
            PwsyncConfig::default()
        }
    }
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Sync { source, delay_ms } => {
                let cfg = load_config(cli.config.as_deref());
                tracing::debug!("loaded config: {:?}", cfg);
                run_sync(&cfg, &source, delay_ms)?;
            }
            CliCommand::List { source } => {
                let cfg = load_config(cli.config.as_deref());
                run_list(&cfg, &source)?;
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
