//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod process;

pub use config::FinderConfig;
pub use context::{ConfigCache, ConfigContext};
pub use diagnostic::{Diagnostic, FindError, ProbeError};
pub use process::{CommandRunner, SystemRunner};
