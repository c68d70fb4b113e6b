//! Command implementations

pub mod configure;
pub mod show_uses;
pub mod toolchain;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use xrootd_finder::util::config::{global_config_path, load_config, project_config_path};
use xrootd_finder::util::context::default_cache_path;
use xrootd_finder::util::FinderConfig;

/// Project root: the current directory.
pub fn project_root() -> Result<PathBuf> {
    std::env::current_dir().context("failed to determine current directory")
}

/// Global and project config files, merged.
pub fn project_config(root: &Path) -> FinderConfig {
    load_config(global_config_path().as_deref(), &project_config_path(root))
}

/// The cache path given on the command line, or the default one.
pub fn cache_path(root: &Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| default_cache_path(root))
}
