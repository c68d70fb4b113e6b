//! Configuration environment.
//!
//! The environment is the key/value store a configuration pass writes its
//! results into (`XROOTD_HOME`, `XRDCP-BIN`, ...). Later build steps read
//! those keys by name, so the names are part of the public contract.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single environment value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Int(i64),
    Str(String),
}

impl EnvValue {
    /// Get the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            EnvValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Int(i) => write!(f, "{}", i),
            EnvValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EnvValue {
    fn from(value: i64) -> Self {
        EnvValue::Int(value)
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::Str(value.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        EnvValue::Str(value)
    }
}

impl From<&Path> for EnvValue {
    fn from(value: &Path) -> Self {
        EnvValue::Str(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for EnvValue {
    fn from(value: PathBuf) -> Self {
        EnvValue::from(value.as_path())
    }
}

/// Key/value environment produced by a configuration pass.
///
/// Keys are kept sorted so that a cached environment serializes the same
/// way on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigEnv {
    vars: BTreeMap<String, EnvValue>,
}

impl ConfigEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        ConfigEnv {
            vars: BTreeMap::new(),
        }
    }

    /// Set a key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Remove a key, returning its previous value.
    pub fn unset(&mut self, key: &str) -> Option<EnvValue> {
        self.vars.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.vars.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(EnvValue::as_str)
    }

    /// Get a string value interpreted as a filesystem path.
    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get_str(key).map(PathBuf::from)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(EnvValue::as_int)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Iterate over all keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
