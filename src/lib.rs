//! crossbuild - toolchain selection and invocation for cross-compiled payloads
//!
//! A caller describes a build with a [`BuildDescriptor`], hands it to a
//! [`Compiler`] backend, and gets back either the toolchain's output or a
//! classified [`CompilerError`].

pub mod compiler;
pub mod core;
pub mod util;

/// Test utilities and mocks for crossbuild unit tests.
///
/// Only compiled for tests. Provides a scripted process runner.
#[cfg(test)]
pub mod test_support;

pub use crate::compiler::{create_compiler, BackendId, CCompiler, Compiler, CompilerError, GoCompiler};
pub use crate::core::{ArtifactKind, BuildDescriptor, BuildMode, TargetOs};
pub use crate::util::config::{Config, ToolchainSettings};
