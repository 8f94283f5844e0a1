//! Toolchain selection for the C/C++ backend.
//!
//! Turns a `BuildDescriptor` into a `ToolchainConfig`: which compiler driver
//! to run and which flags to pass it. Pure decision logic, no I/O.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::core::descriptor::{BuildDescriptor, TargetOs};
use crate::util::config::ToolchainSettings;

/// Flags that link the C runtime and C++ standard library statically.
///
/// The target host cannot be assumed to have the MinGW runtime installed.
pub const STATIC_LINK_FLAGS: [&str; 3] = ["--static", "-static-libstdc++", "-static-libgcc"];

/// Lets C++ string literals convert to mutable byte pointers.
pub const PERMISSIVE_FLAG: &str = "-fpermissive";

/// Shared library output.
pub const SHARED_FLAG: &str = "-shared";

/// Whether the selector alone decides if `flag` is passed.
fn is_reserved_flag(flag: &str) -> bool {
    STATIC_LINK_FLAGS.contains(&flag) || flag == PERMISSIVE_FLAG || flag == SHARED_FLAG
}

/// Decides whether a payload needs the C++ driver.
pub trait LanguageDetector: Send + Sync {
    /// Return true if the detected imports require a C++ toolchain.
    fn requires_cxx(&self, imports: &BTreeSet<String>) -> bool;
}

/// Detects C++ by exact membership of marker imports (e.g. `iostream`).
///
/// C++ code with no marker import falls through to the C driver.
#[derive(Debug, Clone)]
pub struct MarkerDetector {
    markers: Vec<String>,
}

impl MarkerDetector {
    pub fn new(markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        MarkerDetector {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for MarkerDetector {
    fn default() -> Self {
        MarkerDetector::new(crate::util::config::DEFAULT_CXX_MARKERS)
    }
}

impl LanguageDetector for MarkerDetector {
    fn requires_cxx(&self, imports: &BTreeSet<String>) -> bool {
        self.markers.iter().any(|m| imports.contains(m))
    }
}

/// Concrete toolchain configuration for one build attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Working directory of the toolchain invocation
    pub project_dir: PathBuf,
    /// Target operating system
    pub target_os: TargetOs,
    /// Compiler driver to run
    pub toolchain_path: PathBuf,
    /// Ordered compiler flags
    pub flags: Vec<String>,
    /// Environment variables added to the invocation
    pub env: Vec<(String, String)>,
    /// Export definition template, set for forwarding DLL builds
    pub export_definition: Option<PathBuf>,
    /// Requested artifact variants
    pub artifacts: BTreeSet<String>,
}

impl ToolchainConfig {
    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

/// Selects the MinGW driver and flag set for C/C++ payloads.
pub struct ToolchainSelector {
    cc: PathBuf,
    cxx: PathBuf,
    export_def: PathBuf,
    extra_flags: Vec<String>,
    detector: Box<dyn LanguageDetector>,
}

impl ToolchainSelector {
    /// Create a selector from toolchain settings.
    ///
    /// Extra flags that duplicate the static, permissive or shared flags are
    /// dropped with a warning.
    pub fn new(settings: &ToolchainSettings) -> Self {
        let extra_flags = settings
            .extra_flags()
            .iter()
            .filter(|flag| {
                let reserved = is_reserved_flag(flag);
                if reserved {
                    tracing::warn!("Ignoring extra flag `{}`, it is set by the toolchain selector", flag);
                }
                !reserved
            })
            .cloned()
            .collect();

        ToolchainSelector {
            cc: settings.cc(),
            cxx: settings.cxx(),
            export_def: settings.export_def(),
            extra_flags,
            detector: Box::new(MarkerDetector::new(settings.cxx_markers())),
        }
    }

    /// Replace the C++ detector.
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Derive the toolchain configuration for a descriptor.
    pub fn prepare(&self, descriptor: &BuildDescriptor) -> ToolchainConfig {
        let cxx = self.detector.requires_cxx(&descriptor.imports);

        let mut flags = Vec::new();
        let toolchain_path = if cxx {
            flags.push(PERMISSIVE_FLAG.to_string());
            self.cxx.clone()
        } else {
            self.cc.clone()
        };

        flags.extend(STATIC_LINK_FLAGS.iter().map(|f| f.to_string()));

        if descriptor.build_mode.is_shared() {
            flags.push(SHARED_FLAG.to_string());
        }

        flags.extend(self.extra_flags.iter().cloned());

        let export_definition = descriptor
            .wants_dll_forward()
            .then(|| self.export_def.clone());

        tracing::debug!(
            "Selected {} for {} ({})",
            toolchain_path.display(),
            descriptor.target_os,
            if cxx { "c++" } else { "c" }
        );

        ToolchainConfig {
            project_dir: descriptor.project_dir.clone(),
            target_os: descriptor.target_os,
            toolchain_path,
            flags,
            env: Vec::new(),
            export_definition,
            artifacts: descriptor.artifacts.clone(),
        }
    }
}

impl fmt::Debug for ToolchainSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolchainSelector")
            .field("cc", &self.cc)
            .field("cxx", &self.cxx)
            .field("export_def", &self.export_def)
            .field("extra_flags", &self.extra_flags)
            .finish_non_exhaustive()
    }
}
