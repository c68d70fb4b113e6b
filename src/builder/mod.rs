//! Compiler driver used by configuration checks.

pub mod toolchain;

pub use toolchain::{
    detect_toolchain, CheckInput, CommandSpec, GccToolchain, Toolchain, ToolchainPlatform,
};
