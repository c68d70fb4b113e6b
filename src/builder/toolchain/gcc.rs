//! GCC/Clang toolchain implementation.

use std::path::{Path, PathBuf};

use super::{CheckInput, CommandSpec, Toolchain, ToolchainPlatform};

/// GCC/Clang toolchain (Unix-like systems).
#[derive(Debug, Clone)]
pub struct GccToolchain {
    /// Path to the C++ compiler
    pub cxx: PathBuf,
    /// Compiler family (gcc, clang, apple-clang)
    pub family: ToolchainPlatform,
}

impl GccToolchain {
    /// Create a new GCC-style toolchain.
    pub fn new(cxx: impl Into<PathBuf>, family: ToolchainPlatform) -> Self {
        GccToolchain {
            cxx: cxx.into(),
            family,
        }
    }
}

impl Toolchain for GccToolchain {
    fn platform(&self) -> ToolchainPlatform {
        self.family
    }

    fn cxx_compiler_path(&self) -> &Path {
        &self.cxx
    }

    fn check_program_command(&self, input: &CheckInput) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.cxx).args(input.cxxflags.iter().cloned());

        for dir in &input.include_dirs {
            cmd = cmd.arg(format!("-I{}", dir.display()));
        }

        // Libraries must come after the source for the GNU linker
        cmd = cmd
            .arg("-o")
            .arg(input.output.display().to_string())
            .arg(input.source.display().to_string());

        for dir in &input.lib_dirs {
            cmd = cmd.arg(format!("-L{}", dir.display()));
        }

        for lib in &input.libs {
            cmd = cmd.arg(format!("-l{}", lib));
        }

        cmd.args(input.ldflags.iter().cloned())
    }

    fn exe_extension(&self) -> &str {
        if cfg!(windows) {
            ".exe"
        } else {
            ""
        }
    }
}
