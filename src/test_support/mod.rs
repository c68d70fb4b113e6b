//! Test utilities and mocks for unit tests.
//!
//! Provides a scripted [`CommandRunner`] so configuration checks can be
//! exercised without a real compiler, and fixtures that lay out fake
//! installations on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use xrootd_finder::test_support::{CommandPattern, MockProcessOutput, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.expect(
//!     CommandPattern::StartsWith("g++".into()),
//!     MockProcessOutput::failure(1, "fatal error"),
//! );
//! let ctx = ConfigContext::new().with_runner(runner.clone());
//! ```

pub mod fixtures;

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::builder::CommandSpec;
use crate::util::process::{CommandRunner, ProcessOutput};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

impl From<MockProcessOutput> for ProcessOutput {
    fn from(output: MockProcessOutput) -> Self {
        ProcessOutput {
            status: Some(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Pattern for matching commands in [`MockRunner`].
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match using a regex pattern.
    Regex(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
            CommandPattern::Any => true,
        }
    }
}

#[derive(Debug, Default)]
struct RunnerState {
    expectations: Vec<(CommandPattern, MockProcessOutput)>,
    spawn_failures: Vec<CommandPattern>,
    calls: Vec<String>,
    default_output: Option<MockProcessOutput>,
}

/// Scripted command runner.
///
/// Commands are matched against expectations in the order they were added;
/// unmatched commands get the default output, or fail to spawn when no
/// default is set. Clones share state, so a test can keep a handle after
/// moving the runner into a context.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<RunnerState>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `output` for commands matching `pattern`.
    pub fn expect(&self, pattern: CommandPattern, output: MockProcessOutput) -> &Self {
        self.state.lock().unwrap().expectations.push((pattern, output));
        self
    }

    /// Output for commands that match no expectation.
    pub fn set_default(&self, output: MockProcessOutput) -> &Self {
        self.state.lock().unwrap().default_output = Some(output);
        self
    }

    /// Make commands matching `pattern` fail to start.
    pub fn fail_spawn(&self, pattern: CommandPattern) -> &Self {
        self.state.lock().unwrap().spawn_failures.push(pattern);
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &CommandSpec, _cwd: Option<&Path>) -> Result<ProcessOutput> {
        let full_cmd = cmd.to_string();
        let mut state = self.state.lock().unwrap();
        state.calls.push(full_cmd.clone());

        if state.spawn_failures.iter().any(|p| p.matches(&full_cmd)) {
            bail!("failed to execute: {}", full_cmd);
        }

        if let Some((_, output)) = state
            .expectations
            .iter()
            .find(|(pattern, _)| pattern.matches(&full_cmd))
        {
            return Ok(output.clone().into());
        }

        match &state.default_output {
            Some(output) => Ok(output.clone().into()),
            None => bail!("unexpected command: {}", full_cmd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_pattern() {
        assert!(CommandPattern::Exact("g++ --version".into()).matches("g++ --version"));
        assert!(CommandPattern::StartsWith("g++".into()).matches("g++ -o out main.cpp"));
        assert!(CommandPattern::Contains("-lXrdPosix".into()).matches("g++ -lXrdPosix"));
        assert!(CommandPattern::Regex("check$".into()).matches("/tmp/x/xrootd-check"));
        assert!(!CommandPattern::Regex("(".into()).matches("anything"));
    }

    #[test]
    fn test_mock_runner_order_and_default() {
        let runner = MockRunner::new();
        runner
            .expect(
                CommandPattern::StartsWith("g++".into()),
                MockProcessOutput::failure(1, "boom"),
            )
            .set_default(MockProcessOutput::success("ok"));

        let compile = runner.run(&CommandSpec::new("g++").arg("main.cpp"), None).unwrap();
        assert_eq!(compile.status, Some(1));
        let other = runner.run(&CommandSpec::new("./a.out"), None).unwrap();
        assert!(other.success());
        assert_eq!(other.stdout, "ok");

        assert_eq!(runner.calls(), vec!["g++ main.cpp", "./a.out"]);
    }

    #[test]
    fn test_mock_runner_unexpected() {
        let runner = MockRunner::new();
        assert!(runner.run(&CommandSpec::new("unknown"), None).is_err());

        runner.set_default(MockProcessOutput::success(""));
        runner.fail_spawn(CommandPattern::Contains("clang".into()));
        assert!(runner.run(&CommandSpec::new("clang++"), None).is_err());
        assert!(runner.run(&CommandSpec::new("g++"), None).is_ok());
    }
}
