//! Core data structures.
//!
//! - Configuration environment (`ConfigEnv`)
//! - Use targets and their registry
//! - Declared configuration options
//! - Discovery results and find options

pub mod discovery;
pub mod env;
pub mod options;
pub mod uselib;

pub use discovery::{DiscoveryResult, FindOptions};
pub use env::{ConfigEnv, EnvValue};
pub use options::{OptionError, OptionRegistry, OptionSpec};
pub use uselib::{UseRegistry, UseTarget};
