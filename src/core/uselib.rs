//! Use targets: named bundles of compile and link requirements.
//!
//! Downstream build steps refer to a use target by name (`xrootd-posix`)
//! instead of repeating include and library paths.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A named compile/link unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseTarget {
    /// Name other build steps use to refer to this target
    pub name: String,

    /// Libraries to link (without `lib` prefix or extension)
    #[serde(default)]
    pub libs: Vec<String>,

    /// Library search paths
    #[serde(default)]
    pub lib_paths: Vec<PathBuf>,

    /// Headers a consumer is expected to include
    #[serde(default)]
    pub headers: Vec<String>,

    /// Include search paths
    #[serde(default)]
    pub include_paths: Vec<PathBuf>,
}

impl UseTarget {
    /// Create an empty use target.
    pub fn new(name: impl Into<String>) -> Self {
        UseTarget {
            name: name.into(),
            libs: Vec::new(),
            lib_paths: Vec::new(),
            headers: Vec::new(),
            include_paths: Vec::new(),
        }
    }

    /// Add a library to link.
    pub fn with_lib(mut self, lib: impl Into<String>) -> Self {
        self.libs.push(lib.into());
        self
    }

    /// Add a library search path. `None` leaves the target unresolved.
    pub fn with_lib_path(mut self, path: Option<PathBuf>) -> Self {
        self.lib_paths.extend(path);
        self
    }

    /// Add a required header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    /// Add an include search path. `None` leaves the target unresolved.
    pub fn with_include_path(mut self, path: Option<PathBuf>) -> Self {
        self.include_paths.extend(path);
        self
    }

    /// Whether every library and header has a search path to be found under.
    pub fn is_resolved(&self) -> bool {
        (self.libs.is_empty() || !self.lib_paths.is_empty())
            && (self.headers.is_empty() || !self.include_paths.is_empty())
    }

    /// GCC-style compile flags (`-I...`).
    pub fn compile_flags(&self) -> Vec<String> {
        self.include_paths
            .iter()
            .map(|p| format!("-I{}", p.display()))
            .collect()
    }

    /// GCC-style link flags (`-L...` followed by `-l...`).
    pub fn link_flags(&self) -> Vec<String> {
        self.lib_paths
            .iter()
            .map(|p| format!("-L{}", p.display()))
            .chain(self.libs.iter().map(|l| format!("-l{}", l)))
            .collect()
    }
}

/// Registry of use targets, keyed by name.
///
/// Defining a name that already exists replaces the previous target, so a
/// configuration pass can run repeatedly without accumulating entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UseRegistry {
    targets: BTreeMap<String, UseTarget>,
}

impl UseRegistry {
    pub fn new() -> Self {
        UseRegistry {
            targets: BTreeMap::new(),
        }
    }

    /// Register a target, returning the one it replaced.
    pub fn define(&mut self, target: UseTarget) -> Option<UseTarget> {
        tracing::debug!("Defining use target `{}`", target.name);
        self.targets.insert(target.name.clone(), target)
    }

    /// Drop a target, returning it if it was defined.
    pub fn remove(&mut self, name: &str) -> Option<UseTarget> {
        let removed = self.targets.remove(name);
        if removed.is_some() {
            tracing::debug!("Removing use target `{}`", name);
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&UseTarget> {
        self.targets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Iterate over targets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &UseTarget> {
        self.targets.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
