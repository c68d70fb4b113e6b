//! High-level operations.
//!
//! This module contains the configuration checks and the XRootD locator
//! driven by the `find-xrootd` commands.

pub mod check;
pub mod find_base;
pub mod find_xrootd;
pub mod platforms;
pub mod report;

pub use check::{check_fragment, CheckOutcome, FragmentCheck};
pub use find_base::{apply_policy, find_program, probe, ProbeCriteria};
pub use find_xrootd::{configure, find_xrootd, register_options, XrootdReport};
pub use platforms::{HostTriple, Platform};
pub use report::{format_uses, inspect_uses, UseStatus};
