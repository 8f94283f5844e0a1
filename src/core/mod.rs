//! Core data structures for crossbuild.

pub mod descriptor;

pub use descriptor::{ArtifactKind, BuildDescriptor, BuildMode, TargetOs};
