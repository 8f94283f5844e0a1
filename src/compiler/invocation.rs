//! Invocation assembly: from a `ToolchainConfig` to a runnable command.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::{CompilerError, Result};
use super::selector::ToolchainConfig;

/// A command to execute, with program, arguments, environment and working directory.
///
/// Arguments are passed to the process verbatim; nothing goes through a shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// The program to run (e.g., "x86_64-w64-mingw32-gcc")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
    /// Environment variables added on top of the inherited environment
    pub env: Vec<(String, String)>,
    /// Working directory
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
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

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// File name component of the destination.
///
/// The toolchain runs inside the project directory, so the output lands there.
/// Destinations without a final normal component (`/`, `out/..`) are rejected.
pub fn output_file_name(dest: &Path) -> Result<String> {
    dest.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CompilerError::InvalidDestination {
            dest: dest.to_path_buf(),
        })
}

/// Assemble the compiler invocation for a payload.
///
/// Order: flags, `-o <file name>`, payload, then the export definition for
/// forwarding DLL builds.
pub fn build_invocation(
    config: &ToolchainConfig,
    payload: &Path,
    dest: &Path,
) -> Result<CommandSpec> {
    let output = output_file_name(dest)?;
    let mut cmd = CommandSpec::new(&config.toolchain_path)
        .cwd(&config.project_dir)
        .args(config.flags.iter().cloned())
        .arg("-o")
        .arg(output)
        .arg(payload.display().to_string());

    if let Some(ref def) = config.export_definition {
        cmd = cmd.arg(def.display().to_string());
    }

    for (key, value) in &config.env {
        cmd = cmd.env(key, value);
    }

    Ok(cmd)
}
