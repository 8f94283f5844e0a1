//! Subprocess execution for toolchain invocations.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::compiler::error::{CompilerError, Result};
use crate::compiler::invocation::CommandSpec;

/// Runs a toolchain invocation to completion.
///
/// Implementations block until the child exits and never retry.
pub trait ProcessRunner: Send + Sync {
    /// Run the command and return its standard output.
    fn run(&self, cmd: &CommandSpec) -> Result<Vec<u8>>;
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable exit status.
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "termination by signal".to_string(),
        }
    }
}

impl From<Output> for CapturedOutput {
    fn from(output: Output) -> Self {
        CapturedOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Turn a finished process into the build result.
///
/// Success yields stdout; anything else yields `ToolchainExit` carrying the
/// full stderr text.
pub fn check_output(program: &Path, output: CapturedOutput) -> Result<Vec<u8>> {
    if output.success() {
        return Ok(output.stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    tracing::debug!(
        "`{}` failed with {}",
        program.display(),
        output.status_text()
    );

    Err(CompilerError::ToolchainExit {
        program: program.to_path_buf(),
        status: output.status_text(),
        stderr,
    })
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }

    fn build_command(cmd: &CommandSpec) -> Command {
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);

        for (key, value) in &cmd.env {
            command.env(key, value);
        }

        if let Some(ref cwd) = cmd.cwd {
            command.current_dir(cwd);
        }

        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        command
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<Vec<u8>> {
        tracing::debug!("Running {}", cmd.display_command());

        let output = Self::build_command(cmd)
            .output()
            .map_err(|error| CompilerError::ToolchainLaunch {
                program: cmd.program.clone(),
                error,
            })?;

        check_output(&cmd.program, output.into())
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: impl AsRef<Path>) -> Option<PathBuf> {
    which::which(name.as_ref()).ok()
}
