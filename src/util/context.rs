//! Configuration context shared by every step of a configuration pass.
//!
//! The context owns the configuration environment, the use-target registry,
//! the declared options, the loaded toolchain and the detected platform.
//! Every reader and writer receives it explicitly; there is no global state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::Toolchain;
use crate::core::{ConfigEnv, OptionRegistry, UseRegistry};
use crate::ops::platforms::Platform;
use crate::util::config::{FinderConfig, CONFIG_DIR_NAME};
use crate::util::process::{CommandRunner, SystemRunner};

/// Default location of the configuration cache, relative to the project root.
pub fn default_cache_path(project_root: &Path) -> PathBuf {
    project_root
        .join(CONFIG_DIR_NAME)
        .join("c4che")
        .join("xrootd.toml")
}

/// On-disk form of a finished configuration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigCache {
    #[serde(default)]
    pub env: ConfigEnv,
    #[serde(default)]
    pub uses: UseRegistry,
}

impl ConfigCache {
    /// Read a cache written by [`ConfigContext::store`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration cache: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse configuration cache: {}", path.display()))
    }
}

/// State of one configuration pass.
pub struct ConfigContext {
    env: ConfigEnv,
    uses: UseRegistry,
    options: OptionRegistry,
    config: FinderConfig,
    platform: Option<Platform>,
    toolchain: Option<Box<dyn Toolchain>>,
    runner: Box<dyn CommandRunner>,
}

impl ConfigContext {
    /// Create an empty context that runs commands as real subprocesses.
    pub fn new() -> Self {
        ConfigContext {
            env: ConfigEnv::new(),
            uses: UseRegistry::new(),
            options: OptionRegistry::new(),
            config: FinderConfig::default(),
            platform: None,
            toolchain: None,
            runner: Box::new(SystemRunner),
        }
    }

    /// Use a different command runner.
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Use settings loaded from config files.
    pub fn with_config(mut self, config: FinderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn env(&self) -> &ConfigEnv {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut ConfigEnv {
        &mut self.env
    }

    pub fn uses(&self) -> &UseRegistry {
        &self.uses
    }

    pub fn uses_mut(&mut self) -> &mut UseRegistry {
        &mut self.uses
    }

    pub fn options(&self) -> &OptionRegistry {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionRegistry {
        &mut self.options
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// The detected platform, if platform detection has been loaded.
    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }

    pub fn load_platform(&mut self, platform: Platform) {
        self.platform = Some(platform);
    }

    /// The loaded C++ toolchain, if any.
    pub fn toolchain(&self) -> Option<&dyn Toolchain> {
        self.toolchain.as_deref()
    }

    /// Load a C++ compiler; records its path as `CXX`.
    pub fn load_compiler(&mut self, toolchain: Box<dyn Toolchain>) {
        self.env.set("CXX", toolchain.cxx_compiler_path());
        self.toolchain = Some(toolchain);
    }

    /// Snapshot of the environment and use targets.
    pub fn cache(&self) -> ConfigCache {
        ConfigCache {
            env: self.env.clone(),
            uses: self.uses.clone(),
        }
    }

    /// Write the environment and use targets to `path`.
    pub fn store(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create cache directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(&self.cache())
            .context("failed to serialize configuration cache")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write configuration cache: {}", path.display()))
    }
}

impl Default for ConfigContext {
    fn default() -> Self {
        Self::new()
    }
}
