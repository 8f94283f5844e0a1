//! Test utilities and mocks for crossbuild unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crossbuild::test_support::{MockProcessOutput, MockRunner};
//!
//! #[test]
//! fn test_example() {
//!     let runner = Arc::new(MockRunner::new());
//!     runner.expect_prefix("x86_64-w64-mingw32-gcc", MockProcessOutput::success(""));
//!
//!     let mut cc = CCompiler::new(&settings).with_runner(runner.clone());
//!     // ...
//! }
//! ```

use std::sync::Mutex;

use crate::compiler::error::{CompilerError, Result};
use crate::compiler::invocation::CommandSpec;
use crate::util::process::{check_output, CapturedOutput, ProcessRunner};

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
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

    fn captured(&self) -> CapturedOutput {
        CapturedOutput {
            code: Some(self.status),
            stdout: self.stdout.clone().into_bytes(),
            stderr: self.stderr.clone().into_bytes(),
        }
    }
}

/// Pattern for matching commands in MockRunner.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<(CommandPattern, MockProcessOutput)>,
    calls: Vec<CommandSpec>,
    default_output: Option<MockProcessOutput>,
}

/// Scripted process runner that records every invocation.
///
/// Commands that match no expectation and have no default fail to launch.
#[derive(Debug, Default)]
pub struct MockRunner {
    state: Mutex<MockState>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&self, prefix: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::StartsWith(prefix.to_string()), output)
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Contains(substring.to_string()), output)
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&self, output: MockProcessOutput) -> &Self {
        self.state.lock().unwrap().default_output = Some(output);
        self
    }

    /// Get all commands that were run.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.state.lock().unwrap().calls.clone()
    }

    fn push(&self, pattern: CommandPattern, output: MockProcessOutput) -> &Self {
        self.state
            .lock()
            .unwrap()
            .expectations
            .push((pattern, output));
        self
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<Vec<u8>> {
        let full_cmd = cmd.display_command();
        let mut state = self.state.lock().unwrap();
        state.calls.push(cmd.clone());

        let output = state
            .expectations
            .iter()
            .find(|(pattern, _)| pattern.matches(&full_cmd))
            .map(|(_, output)| output.clone())
            .or_else(|| state.default_output.clone());

        match output {
            Some(output) => check_output(&cmd.program, output.captured()),
            None => Err(CompilerError::ToolchainLaunch {
                program: cmd.program.clone(),
                error: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("unexpected command: {}", full_cmd),
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_matches_in_order() {
        let runner = MockRunner::new();
        runner
            .expect("gcc --version", MockProcessOutput::success("gcc 13.2.0"))
            .expect_prefix("gcc", MockProcessOutput::failure(1, "boom"));

        let version = runner
            .run(&CommandSpec::new("gcc").arg("--version"))
            .unwrap();
        assert_eq!(version, b"gcc 13.2.0");

        let err = runner.run(&CommandSpec::new("gcc").arg("main.c")).unwrap_err();
        assert_eq!(err.stderr(), Some("boom"));
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_mock_runner_unexpected_command() {
        let runner = MockRunner::new();

        let err = runner.run(&CommandSpec::new("cl.exe")).unwrap_err();
        assert!(matches!(err, CompilerError::ToolchainLaunch { .. }));
        assert!(err.to_string().contains("unexpected command"));
    }
}
