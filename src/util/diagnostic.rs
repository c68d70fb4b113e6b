//! Errors and user-facing diagnostic messages.
//!
//! Probes report failures as [`ProbeError`]; whether a failure stops the
//! configuration pass is decided by the caller and expressed as
//! [`FindError`].

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no C++ compiler is available.
    pub const NO_COMPILER: &str =
        "Install a C++ compiler, set CXX, or pass --check-cxx-compiler=<compiler>";

    /// Suggestion when the install root could not be found.
    pub const WITH_PATH: &str = "Pass --with-xrootd=<prefix> pointing at an XRootD installation";

    /// Suggestion for making the failure non-fatal.
    pub const OPTIONAL: &str = "Drop --mandatory to continue configuring without XRootD";

    /// Suggestion when the smoke test fails.
    pub const VERBOSE: &str = "Re-run with --verbose to see the compiler command";
}

/// Why a single probe failed.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ProbeError {
    #[error("could not find `{header}` for {name} (searched {} location(s))", .searched.len())]
    #[diagnostic(code(xrootd_finder::probe::header_not_found))]
    HeaderNotFound {
        name: String,
        header: String,
        searched: Vec<PathBuf>,
    },

    #[error("compilation check failed: `{command}`\n{stderr}")]
    #[diagnostic(code(xrootd_finder::probe::compile_failed))]
    CompileFailed { command: String, stderr: String },

    #[error("program `{name}` not found{}", in_dir(.path_list))]
    #[diagnostic(code(xrootd_finder::probe::program_not_found))]
    ProgramNotFound {
        name: String,
        path_list: Option<PathBuf>,
    },

    #[error("`{}` exited with status {status:?}\n{stderr}", .program.display())]
    #[diagnostic(code(xrootd_finder::probe::execution_failed))]
    ExecutionFailed {
        program: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    #[error("failed to run `{}`: {message}", .program.display())]
    #[diagnostic(code(xrootd_finder::probe::spawn_failed))]
    Spawn { program: PathBuf, message: String },

    #[error("no C++ compiler loaded")]
    #[diagnostic(code(xrootd_finder::probe::no_compiler))]
    NoCompiler,

    #[error("failed to prepare check directory")]
    #[diagnostic(code(xrootd_finder::probe::io))]
    Io(#[from] std::io::Error),
}

fn in_dir(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Fatal errors that abort a configuration pass.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum FindError {
    #[error("load a C++ compiler first")]
    #[diagnostic(
        code(xrootd_finder::environment_unavailable),
        help("Install a C++ compiler, set CXX, or pass --check-cxx-compiler=<compiler>")
    )]
    EnvironmentUnavailable,

    #[error("{what}: {source}")]
    #[diagnostic(code(xrootd_finder::probe_failed))]
    ProbeFailed {
        what: String,
        #[source]
        source: ProbeError,
    },
}

impl FindError {
    /// Render this error as a [`Diagnostic`] with suggested fixes.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FindError::EnvironmentUnavailable => Diagnostic::error(self.to_string())
                .with_suggestion(suggestions::NO_COMPILER),
            FindError::ProbeFailed { what, source } => {
                let diag = Diagnostic::error(format!("{} failed", what))
                    .with_context(source.to_string());
                match source {
                    ProbeError::HeaderNotFound { searched, .. } => searched
                        .iter()
                        .fold(diag, |d, p| d.with_context(format!("searched {}", p.display())))
                        .with_suggestion(suggestions::WITH_PATH)
                        .with_suggestion(suggestions::OPTIONAL),
                    ProbeError::CompileFailed { .. } | ProbeError::ExecutionFailed { .. } => diag
                        .with_suggestion(suggestions::VERBOSE)
                        .with_suggestion(suggestions::OPTIONAL),
                    _ => diag.with_suggestion(suggestions::OPTIONAL),
                }
            }
        }
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = match (color, self.severity) {
            (true, Severity::Error) => "\x1b[1;31merror\x1b[0m",
            (true, Severity::Warning) => "\x1b[1;33mwarning\x1b[0m",
            (false, Severity::Error) => "error",
            (false, Severity::Warning) => "warning",
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        for ctx in &self.context {
            for line in ctx.lines() {
                output.push_str(&format!("  -> {}\n", line));
            }
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
