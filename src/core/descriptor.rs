//! Build descriptors - what the orchestrator asks us to build.
//!
//! A `BuildDescriptor` is handed to a compiler backend by the caller and is
//! never modified afterwards. Everything a backend decides (toolchain, flags,
//! invocation) is derived from it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Requested-artifact marker that enables the forwarding DLL variant.
pub const DLL_FORWARD_ARTIFACT: &str = "dllforward";

/// Operating system the artifact is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    #[default]
    Windows,
    Linux,
    #[serde(alias = "darwin")]
    Macos,
}

impl TargetOs {
    /// Get the OS name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::Macos => "macos",
        }
    }

    /// Get the name Go uses for this OS in `GOOS`.
    pub fn as_goos(&self) -> &'static str {
        match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::Macos => "darwin",
        }
    }
}

impl std::str::FromStr for TargetOs {
    type Err = TargetOsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win" => Ok(TargetOs::Windows),
            "linux" => Ok(TargetOs::Linux),
            "macos" | "darwin" => Ok(TargetOs::Macos),
            _ => Err(TargetOsParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown target OS.
#[derive(Debug, Clone)]
pub struct TargetOsParseError(pub String);

impl std::fmt::Display for TargetOsParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid target OS '{}', valid values: windows, linux, macos",
            self.0
        )
    }
}

impl std::error::Error for TargetOsParseError {}

/// Whether the toolchain produces an executable or a shared library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    #[default]
    Executable,
    SharedLibrary,
}

impl BuildMode {
    /// Interpret a Go-style build mode string.
    ///
    /// `"c-shared"` selects shared-library mode; every other value,
    /// including the empty string, selects executable mode.
    pub fn from_go_mode(mode: &str) -> Self {
        if mode == "c-shared" {
            BuildMode::SharedLibrary
        } else {
            BuildMode::Executable
        }
    }

    /// Get the Go-style build mode string (`""` for executables).
    pub fn as_go_mode(&self) -> &'static str {
        match self {
            BuildMode::Executable => "",
            BuildMode::SharedLibrary => "c-shared",
        }
    }

    pub fn is_shared(&self) -> bool {
        *self == BuildMode::SharedLibrary
    }
}

/// Normalized artifact kind accepted by the compiler backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Exe,
    Dll,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Exe => "exe",
            ArtifactKind::Dll => "dll",
        }
    }

    /// The build mode this artifact kind implies.
    pub fn build_mode(&self) -> BuildMode {
        match self {
            ArtifactKind::Exe => BuildMode::Executable,
            ArtifactKind::Dll => BuildMode::SharedLibrary,
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied description of a single build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    /// Project directory; the toolchain runs with this as its working directory
    pub project_dir: PathBuf,
    /// Operating system of the produced artifact
    pub target_os: TargetOs,
    /// Executable or shared library
    pub build_mode: BuildMode,
    /// Imports detected in the payload source (header names, packages)
    pub imports: BTreeSet<String>,
    /// Requested artifact variants (e.g. `dllforward`)
    pub artifacts: BTreeSet<String>,
}

impl BuildDescriptor {
    /// Create a descriptor for an executable with no imports or artifacts.
    pub fn new(project_dir: impl Into<PathBuf>, target_os: TargetOs) -> Self {
        BuildDescriptor {
            project_dir: project_dir.into(),
            target_os,
            build_mode: BuildMode::Executable,
            imports: BTreeSet::new(),
            artifacts: BTreeSet::new(),
        }
    }

    /// Set the build mode.
    pub fn with_build_mode(mut self, build_mode: BuildMode) -> Self {
        self.build_mode = build_mode;
        self
    }

    /// Add detected imports.
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    /// Add requested artifacts.
    pub fn with_artifacts(
        mut self,
        artifacts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.artifacts.extend(artifacts.into_iter().map(Into::into));
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Check whether the forwarding DLL variant was requested.
    pub fn wants_dll_forward(&self) -> bool {
        self.artifacts.contains(DLL_FORWARD_ARTIFACT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mode_from_go_mode() {
        assert_eq!(BuildMode::from_go_mode("c-shared"), BuildMode::SharedLibrary);
        assert_eq!(BuildMode::from_go_mode(""), BuildMode::Executable);
        assert_eq!(BuildMode::from_go_mode("pie"), BuildMode::Executable);
        assert_eq!(BuildMode::SharedLibrary.as_go_mode(), "c-shared");
        assert_eq!(BuildMode::Executable.as_go_mode(), "");
    }

    #[test]
    fn test_target_os_parse() {
        assert_eq!("windows".parse::<TargetOs>().unwrap(), TargetOs::Windows);
        assert_eq!("Darwin".parse::<TargetOs>().unwrap(), TargetOs::Macos);
        assert_eq!(TargetOs::Macos.as_goos(), "darwin");

        let err = "plan9".parse::<TargetOs>().unwrap_err();
        assert!(err.to_string().contains("plan9"));
    }

    #[test]
    fn test_descriptor_builder() {
        let desc = BuildDescriptor::new("/tmp/proj", TargetOs::Windows)
            .with_build_mode(BuildMode::SharedLibrary)
            .with_imports(["iostream", "windows.h"])
            .with_artifacts([DLL_FORWARD_ARTIFACT]);

        assert!(desc.build_mode.is_shared());
        assert!(desc.imports.contains("iostream"));
        assert!(desc.wants_dll_forward());
    }

    #[test]
    fn test_descriptor_deserialize() {
        let desc: BuildDescriptor = serde_json::from_str(
            r#"{
                "project_dir": "/work/payload",
                "target_os": "windows",
                "build_mode": "shared-library",
                "imports": ["stdio.h"],
                "artifacts": []
            }"#,
        )
        .unwrap();

        assert_eq!(desc.target_os, TargetOs::Windows);
        assert_eq!(desc.build_mode, BuildMode::SharedLibrary);
        assert!(!desc.wants_dll_forward());
    }
}
