//! Classified failures of a build attempt.

use std::path::PathBuf;

use thiserror::Error;

/// Error produced by a compiler backend.
///
/// Every variant is terminal for the build attempt; nothing is retried.
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("unsupported executable type `{kind}`, expected one of: exe, dll")]
    UnsupportedArtifact { kind: String },

    #[error("failed to launch `{}`: {error}", .program.display())]
    ToolchainLaunch {
        program: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("`{}` failed with {status}: {stderr}", .program.display())]
    ToolchainExit {
        program: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("destination `{}` has no file name", .dest.display())]
    InvalidDestination { dest: PathBuf },

    #[error("build requested before the toolchain was prepared")]
    NotPrepared,
}

impl CompilerError {
    /// Captured standard error of the toolchain, if it ran.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            CompilerError::ToolchainExit { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

pub type Result<T, E = CompilerError> = std::result::Result<T, E>;
