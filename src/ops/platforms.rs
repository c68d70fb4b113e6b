//! Host platform detection.
//!
//! Supplies the default install prefixes a find routine searches when the
//! user gives no explicit path, plus any `<NAME>_HOME` hints from the
//! process environment.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Host target triple components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTriple {
    /// CPU architecture (x86_64, aarch64, etc.)
    pub arch: String,
    /// Vendor (unknown, apple, pc, etc.)
    pub vendor: String,
    /// Operating system (linux, macos, windows, etc.)
    pub os: String,
    /// Environment/ABI (gnu, msvc, etc.)
    pub env: Option<String>,
}

impl HostTriple {
    /// Detect the host triple.
    pub fn host() -> Self {
        let arch = std::env::consts::ARCH;
        let os = std::env::consts::OS;

        let (vendor, env) = match os {
            "linux" => ("unknown", Some("gnu")),
            "macos" => ("apple", None),
            "windows" => ("pc", Some("msvc")),
            _ => ("unknown", None),
        };

        HostTriple {
            arch: arch.to_string(),
            vendor: vendor.to_string(),
            os: os.to_string(),
            env: env.map(String::from),
        }
    }
}

impl fmt::Display for HostTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.env {
            Some(env) => write!(f, "{}-{}-{}-{}", self.arch, self.vendor, self.os, env),
            None => write!(f, "{}-{}-{}", self.arch, self.vendor, self.os),
        }
    }
}

/// Default install prefixes for an operating system.
pub fn default_prefixes(os: &str) -> Vec<PathBuf> {
    let prefixes: &[&str] = match os {
        "linux" => &["/usr", "/usr/local", "/opt/xrootd"],
        "macos" => &[
            "/usr",
            "/usr/local",
            "/opt/xrootd",
            "/opt/homebrew",
            "/opt/local",
        ],
        "windows" => &[],
        _ => &["/usr", "/usr/local"],
    };
    prefixes.iter().map(PathBuf::from).collect()
}

/// The platform a configuration pass runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub triple: HostTriple,
    /// Prefixes searched after any user-supplied path
    pub default_prefixes: Vec<PathBuf>,
    /// `<NAME>_HOME` values captured from the process environment
    env_roots: BTreeMap<String, PathBuf>,
}

impl Platform {
    /// Detect the host platform and capture `*_HOME` variables.
    pub fn detect() -> Self {
        let triple = HostTriple::host();
        let default_prefixes = default_prefixes(&triple.os);
        let env_roots = std::env::vars_os()
            .filter_map(|(k, v)| {
                let key = k.into_string().ok()?;
                let name = key.strip_suffix("_HOME")?.to_string();
                (!v.is_empty()).then(|| (name, PathBuf::from(v)))
            })
            .collect();

        Platform {
            triple,
            default_prefixes,
            env_roots,
        }
    }

    /// A host platform with explicit prefixes and no environment hints.
    pub fn with_prefixes(prefixes: Vec<PathBuf>) -> Self {
        Platform {
            triple: HostTriple::host(),
            default_prefixes: prefixes,
            env_roots: BTreeMap::new(),
        }
    }

    /// Record an install root hint, as if `<NAME>_HOME` were set.
    pub fn with_env_root(mut self, name: &str, root: impl Into<PathBuf>) -> Self {
        self.env_roots.insert(name.to_uppercase(), root.into());
        self
    }

    /// The `<NAME>_HOME` hint for a library, if one was set.
    pub fn env_root(&self, name: &str) -> Option<&PathBuf> {
        self.env_roots.get(&name.to_uppercase())
    }
}
