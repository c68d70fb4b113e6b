//! xrootd-finder - locate and validate an XRootD installation
//!
//! This crate provides the configuration pass that finds XRootD headers,
//! libraries and programs, registers them as use targets, and checks that
//! a C++ program can be built against them.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Only compiled for tests. Provides a scripted command runner and fake
/// installation trees.
#[cfg(test)]
pub mod test_support;

pub use core::{ConfigEnv, DiscoveryResult, FindOptions, UseRegistry, UseTarget};
pub use ops::{configure, find_xrootd, XrootdReport};
pub use util::context::ConfigContext;
pub use util::diagnostic::FindError;
