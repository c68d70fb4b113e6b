//! Configuration-time options.
//!
//! Plugins declare the options they understand (`--with-xrootd`) in an
//! [`OptionRegistry`]; the front end then fills in values. Setting an
//! option nobody declared is an error, so typos are caught early.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

/// A declared option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Option name without leading dashes (e.g., "with-xrootd")
    pub name: String,
    /// Help text
    pub help: String,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        OptionSpec {
            name: name.into(),
            help: help.into(),
        }
    }

    /// The option as written on a command line (`--with-xrootd`).
    pub fn flag(&self) -> String {
        format!("--{}", self.name)
    }
}

/// Errors from setting option values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option `--{0}`")]
    Unknown(String),
}

/// Declared options and their values.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    specs: Vec<OptionSpec>,
    values: BTreeMap<String, String>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        OptionRegistry {
            specs: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    /// Declare an option. Returns false if it was already declared.
    pub fn add_option(&mut self, spec: OptionSpec) -> bool {
        if self.is_declared(&spec.name) {
            return false;
        }
        self.specs.push(spec);
        true
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.specs.iter().any(|s| s.name == name)
    }

    /// Set the value of a declared option.
    pub fn set_value(
        &mut self,
        name: impl AsRef<str>,
        value: impl Into<String>,
    ) -> Result<(), OptionError> {
        let name = name.as_ref().trim_start_matches('-');
        if !self.is_declared(name) {
            return Err(OptionError::Unknown(name.to_string()));
        }
        self.values.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Get an option's value, if one was set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn get_path(&self, name: &str) -> Option<PathBuf> {
        self.get(name).filter(|v| !v.is_empty()).map(PathBuf::from)
    }

    /// Get a list-valued option.
    ///
    /// A value containing a comma is split on commas only, so entries may
    /// contain spaces (`/opt/my tools/g++,clang++`). Otherwise it is split
    /// on whitespace (`g++ clang++`).
    pub fn get_list(&self, name: &str) -> Vec<String> {
        let Some(value) = self.get(name) else {
            return Vec::new();
        };
        let items: Vec<&str> = if value.contains(',') {
            value.split(',').collect()
        } else {
            value.split_whitespace().collect()
        };
        items
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Declared options in declaration order.
    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }
}
