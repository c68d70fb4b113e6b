//! Discovery results and the typed options that drive discovery.

use std::path::{Path, PathBuf};

use semver::Version;
use serde::Serialize;

/// Options recognised by a find routine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Candidate install root to search before the defaults
    pub with_path: Option<PathBuf>,
    /// Whether any failed probe aborts the configuration pass
    pub mandatory: bool,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.with_path = Some(path.into());
        self
    }

    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }
}

/// Where a library was found, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryResult {
    /// Install root (contains `bin/`, `lib/`, `include/`)
    pub root: Option<PathBuf>,
    /// Version read from the installation, when it could be parsed
    pub version: Option<Version>,
}

impl DiscoveryResult {
    /// A result for a root that was found.
    pub fn found_at(root: impl Into<PathBuf>) -> Self {
        DiscoveryResult {
            root: Some(root.into()),
            version: None,
        }
    }

    pub fn not_found() -> Self {
        DiscoveryResult::default()
    }

    pub fn found(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn bin_dir(&self) -> Option<PathBuf> {
        self.subdir("bin")
    }

    pub fn lib_dir(&self) -> Option<PathBuf> {
        self.subdir("lib")
    }

    pub fn include_dir(&self) -> Option<PathBuf> {
        self.subdir("include")
    }

    fn subdir(&self, segment: &str) -> Option<PathBuf> {
        self.root.as_ref().map(|r| r.join(segment))
    }
}
