//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.hepwaf/xrootd.toml` - User-wide defaults
//! - Project: `.hepwaf/xrootd.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [xrootd]
//! with_path = "/opt/xrootd"
//! mandatory = true
//!
//! [toolchain]
//! cxx = "/usr/bin/clang++"
//! cxxflags = ["-std=c++17"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-user and per-project config directory.
pub const CONFIG_DIR_NAME: &str = ".hepwaf";

/// Name of the config file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "xrootd.toml";

/// Finder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Discovery settings
    pub xrootd: XrootdSettings,

    /// Toolchain settings
    pub toolchain: ToolchainSettings,
}

/// Discovery defaults, overridden by command line options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrootdSettings {
    /// Install root to search first (same as `--with-xrootd`)
    pub with_path: Option<PathBuf>,

    /// Whether a failed probe aborts configuration
    pub mandatory: Option<bool>,
}

/// Toolchain settings for configuration checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the C++ compiler (e.g., /usr/bin/clang++)
    pub cxx: Option<PathBuf>,

    /// Additional C++ compiler flags
    pub cxxflags: Vec<String>,

    /// Additional linker flags
    pub ldflags: Vec<String>,
}

impl FinderConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: FinderConfig) {
        if other.xrootd.with_path.is_some() {
            self.xrootd.with_path = other.xrootd.with_path;
        }
        if other.xrootd.mandatory.is_some() {
            self.xrootd.mandatory = other.xrootd.mandatory;
        }
        if other.toolchain.cxx.is_some() {
            self.toolchain.cxx = other.toolchain.cxx;
        }
        if !other.toolchain.cxxflags.is_empty() {
            self.toolchain.cxxflags = other.toolchain.cxxflags;
        }
        if !other.toolchain.ldflags.is_empty() {
            self.toolchain.ldflags = other.toolchain.ldflags;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.hepwaf/xrootd.toml)
/// 2. Global config (~/.hepwaf/xrootd.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> FinderConfig {
    let mut config = FinderConfig::default();

    if let Some(global) = global_path {
        config.merge(FinderConfig::load_or_default(global));
    }

    config.merge(FinderConfig::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.hepwaf).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (~/.hepwaf/xrootd.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Get the project config path (.hepwaf/xrootd.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config: FinderConfig = toml::from_str(
            r#"
            [xrootd]
            with_path = "/opt/xrootd"
            mandatory = true

            [toolchain]
            cxx = "/usr/bin/clang++"
            cxxflags = ["-std=c++17"]
            "#,
        )
        .unwrap();

        assert_eq!(config.xrootd.with_path, Some(PathBuf::from("/opt/xrootd")));
        assert_eq!(config.xrootd.mandatory, Some(true));
        assert_eq!(config.toolchain.cxx, Some(PathBuf::from("/usr/bin/clang++")));
        assert_eq!(config.toolchain.cxxflags, vec!["-std=c++17"]);
        assert!(config.toolchain.ldflags.is_empty());
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());

        std::fs::write(
            &global,
            "[xrootd]\nwith_path = \"/usr\"\nmandatory = true\n",
        )
        .unwrap();
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[xrootd]\nwith_path = \"/opt/xrootd\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.xrootd.with_path, Some(PathBuf::from("/opt/xrootd")));
        assert_eq!(config.xrootd.mandatory, Some(true));
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("xrootd.toml");
        std::fs::write(&path, "[xrootd\nbroken").unwrap();

        assert!(FinderConfig::load(&path).is_err());
        assert_eq!(FinderConfig::load_or_default(&path), FinderConfig::default());
    }

    #[test]
    fn test_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, FinderConfig::default());
    }
}
