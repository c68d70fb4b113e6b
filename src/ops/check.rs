//! Compile-and-link configuration checks.
//!
//! A check writes a small C++ fragment into a scratch directory, builds it
//! with the loaded toolchain and optionally runs the result. Checks never
//! decide whether a failure is fatal; they only report it.

use std::path::PathBuf;

use crate::builder::{CheckInput, CommandSpec};
use crate::core::UseTarget;
use crate::util::context::ConfigContext;
use crate::util::diagnostic::ProbeError;

/// Base name of the executable a check produces.
const CHECK_EXE_NAME: &str = "xrootd-check";

/// A fragment to compile, link and optionally execute.
#[derive(Debug, Clone, Default)]
pub struct FragmentCheck {
    /// C++ source of the program
    pub fragment: String,
    pub include_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
    pub libs: Vec<String>,
    /// Run the program after linking it
    pub execute: bool,
}

impl FragmentCheck {
    pub fn new(fragment: impl Into<String>) -> Self {
        FragmentCheck {
            fragment: fragment.into(),
            ..Default::default()
        }
    }

    /// A program that only includes `header` and returns success.
    pub fn header(header: &str) -> Self {
        FragmentCheck::new(format!(
            "#include \"{}\"\n\nint main(int argc, char* argv[]) {{\n  return 0;\n}}\n",
            header
        ))
    }

    pub fn with_include_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.include_dirs.extend(dir);
        self
    }

    pub fn with_lib_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.lib_dirs.extend(dir);
        self
    }

    /// Build against the paths and libraries of a use target.
    pub fn with_use(mut self, target: &UseTarget) -> Self {
        self.include_dirs.extend(target.include_paths.iter().cloned());
        self.lib_dirs.extend(target.lib_paths.iter().cloned());
        self.libs.extend(target.libs.iter().cloned());
        self
    }

    pub fn execute(mut self, execute: bool) -> Self {
        self.execute = execute;
        self
    }
}

/// What a successful check ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The compile-and-link command line
    pub command: String,
    /// Whether the program was also executed
    pub executed: bool,
}

/// Run a fragment check with the context's toolchain.
pub fn check_fragment(
    ctx: &ConfigContext,
    check: &FragmentCheck,
) -> Result<CheckOutcome, ProbeError> {
    let toolchain = ctx.toolchain().ok_or(ProbeError::NoCompiler)?;

    let scratch = tempfile::Builder::new()
        .prefix("xrootd-finder-")
        .tempdir()?;
    let source = scratch.path().join("main.cpp");
    std::fs::write(&source, &check.fragment)?;
    let output = scratch
        .path()
        .join(format!("{}{}", CHECK_EXE_NAME, toolchain.exe_extension()));

    let settings = &ctx.config().toolchain;
    let input = CheckInput {
        source,
        output: output.clone(),
        include_dirs: check.include_dirs.clone(),
        lib_dirs: check.lib_dirs.clone(),
        libs: check.libs.clone(),
        cxxflags: settings.cxxflags.clone(),
        ldflags: settings.ldflags.clone(),
    };

    let cmd = toolchain.check_program_command(&input);
    let command = cmd.to_string();
    tracing::debug!("Check: {}", command);

    let result = ctx
        .runner()
        .run(&cmd, Some(scratch.path()))
        .map_err(|e| ProbeError::Spawn {
            program: cmd.program.clone(),
            message: format!("{:#}", e),
        })?;

    if !result.success() {
        return Err(ProbeError::CompileFailed {
            command,
            stderr: result.stderr,
        });
    }

    if check.execute {
        let run = CommandSpec::new(&output);
        let result = ctx
            .runner()
            .run(&run, Some(scratch.path()))
            .map_err(|e| ProbeError::Spawn {
                program: output.clone(),
                message: format!("{:#}", e),
            })?;

        if !result.success() {
            return Err(ProbeError::ExecutionFailed {
                program: output,
                status: result.status,
                stderr: result.stderr,
            });
        }
    }

    Ok(CheckOutcome {
        command,
        executed: check.execute,
    })
}
