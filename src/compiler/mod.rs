//! Compiler backends.
//!
//! A `Compiler` turns a `BuildDescriptor` into a toolchain invocation and runs
//! it. Callers hold a `Box<dyn Compiler>` and do not know which backend is
//! behind it.
//!
//! One instance serves one build attempt at a time: `prepare_build` stores a
//! fresh configuration and `build` consumes it.

use std::path::Path;

use crate::core::descriptor::{ArtifactKind, BuildDescriptor, BuildMode};

mod backend;
mod c;
pub mod error;
mod go;
pub mod invocation;
pub mod selector;

pub use backend::{create_compiler, BackendId, BackendIdParseError};
pub use c::CCompiler;
pub use error::{CompilerError, Result};
pub use go::GoCompiler;
pub use invocation::CommandSpec;
pub use selector::{LanguageDetector, MarkerDetector, ToolchainConfig, ToolchainSelector};

/// Capability interface implemented by every toolchain backend.
pub trait Compiler: Send {
    /// Which backend this is.
    fn backend(&self) -> BackendId;

    /// Select the toolchain and flags for a build, replacing any earlier preparation.
    fn prepare_build(&mut self, descriptor: &BuildDescriptor) -> Result<()>;

    /// The invocation `build` would run, without running it.
    fn plan(&self, payload: &Path, dest: &Path) -> Result<CommandSpec>;

    /// Run the toolchain and return its standard output.
    ///
    /// Consumes the prepared configuration.
    fn build(&mut self, payload: &Path, dest: &Path) -> Result<Vec<u8>>;

    /// Map a requested artifact kind to its normalized kind and build mode.
    fn is_type_supported(&self, kind: &str) -> Result<(ArtifactKind, BuildMode)> {
        parse_artifact_kind(kind)
    }

    /// Export names for the packaging step. Empty for the built-in backends.
    fn export_names(&self, _extension: &str) -> String {
        String::new()
    }

    /// Imports to report in debug builds. Empty for the built-in backends.
    fn debug_imports(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Parse one of the supported artifact kinds (`exe`, `dll`).
pub fn parse_artifact_kind(kind: &str) -> Result<(ArtifactKind, BuildMode)> {
    let kind = match kind {
        "exe" => ArtifactKind::Exe,
        "dll" => ArtifactKind::Dll,
        other => {
            return Err(CompilerError::UnsupportedArtifact {
                kind: other.to_string(),
            })
        }
    };
    Ok((kind, kind.build_mode()))
}
