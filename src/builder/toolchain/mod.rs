//! Toolchain abstraction for the C++ compiler used by configuration checks.
//!
//! A configuration check compiles and links a tiny program, so the only
//! command a toolchain has to know how to build is "compile this source
//! straight into an executable".
//!
//! Toolchain detection priority:
//! 1. Toolchain config file (`.hepwaf/xrootd.toml` or `~/.hepwaf/xrootd.toml`)
//! 2. The `--check-cxx-compiler` option, when given
//! 3. The `CXX` environment variable
//! 4. Auto-detection (searching PATH for common compilers)

use std::fmt;
use std::path::{Path, PathBuf};

mod detect;
mod gcc;

pub use detect::detect_toolchain;
pub use gcc::GccToolchain;

/// A command to execute: program and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to run (e.g., "g++")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Input for a compile-and-link check program.
#[derive(Debug, Clone, Default)]
pub struct CheckInput {
    /// Source file to compile
    pub source: PathBuf,
    /// Output executable
    pub output: PathBuf,
    /// Include directories
    pub include_dirs: Vec<PathBuf>,
    /// Library search paths
    pub lib_dirs: Vec<PathBuf>,
    /// Libraries to link (without -l prefix)
    pub libs: Vec<String>,
    /// Additional compiler flags
    pub cxxflags: Vec<String>,
    /// Additional linker flags
    pub ldflags: Vec<String>,
}

/// The family of a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainPlatform {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
    /// Apple Clang (macOS)
    AppleClang,
}

impl ToolchainPlatform {
    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainPlatform::Gcc => "gcc",
            ToolchainPlatform::Clang => "clang",
            ToolchainPlatform::AppleClang => "apple-clang",
        }
    }
}

impl fmt::Display for ToolchainPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for toolchain implementations.
pub trait Toolchain: fmt::Debug + Send + Sync {
    /// Get the toolchain family.
    fn platform(&self) -> ToolchainPlatform;

    /// Get the C++ compiler path.
    fn cxx_compiler_path(&self) -> &Path;

    /// Generate a command that compiles and links `input.source` into
    /// the executable `input.output`.
    fn check_program_command(&self, input: &CheckInput) -> CommandSpec;

    /// Generate a command that prints the compiler version.
    fn version_command(&self) -> CommandSpec {
        CommandSpec::new(self.cxx_compiler_path()).arg("--version")
    }

    /// Get the executable extension.
    fn exe_extension(&self) -> &str;
}
