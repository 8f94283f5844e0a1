//! Toolchain configuration files.
//!
//! Two locations are read:
//! - Global: `~/.crossbuild/toolchain.toml` - User-wide defaults
//! - Project: `.crossbuild/toolchain.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default MinGW C compiler.
pub const DEFAULT_CC: &str = "/usr/local/bin/x86_64-w64-mingw32-gcc";

/// Default MinGW C++ compiler.
pub const DEFAULT_CXX: &str = "/usr/local/bin/x86_64-w64-mingw32-g++";

/// Default Go binary, looked up in PATH.
pub const DEFAULT_GO: &str = "go";

pub const DEFAULT_GOARCH: &str = "amd64";

/// Export definition template for forwarding DLLs, relative to the project directory.
pub const DEFAULT_EXPORT_DEF: &str = "../../data/templates/c/evasions/dllforward/example.def";

/// Imports that mark a payload as C++.
pub const DEFAULT_CXX_MARKERS: [&str; 1] = ["iostream"];

/// Toolchain configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Toolchain settings
    pub toolchain: ToolchainSettings,
}

/// Toolchain settings. Unset values fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the C cross compiler
    pub cc: Option<PathBuf>,

    /// Path to the C++ cross compiler
    pub cxx: Option<PathBuf>,

    /// Path to the Go binary
    pub go: Option<PathBuf>,

    /// GOARCH for the Go backend
    pub goarch: Option<String>,

    /// Export definition template for forwarding DLL builds
    pub export_def: Option<PathBuf>,

    /// Imports that select the C++ compiler
    pub cxx_markers: Option<Vec<String>>,

    /// Flags appended after the built-in C/C++ flags
    pub extra_flags: Option<Vec<String>>,
}

impl ToolchainSettings {
    pub fn cc(&self) -> PathBuf {
        self.cc.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CC))
    }

    pub fn cxx(&self) -> PathBuf {
        self.cxx.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CXX))
    }

    pub fn go(&self) -> PathBuf {
        self.go.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_GO))
    }

    pub fn goarch(&self) -> String {
        self.goarch
            .clone()
            .unwrap_or_else(|| DEFAULT_GOARCH.to_string())
    }

    pub fn export_def(&self) -> PathBuf {
        self.export_def
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DEF))
    }

    pub fn cxx_markers(&self) -> Vec<String> {
        match &self.cxx_markers {
            Some(markers) => markers.clone(),
            None => DEFAULT_CXX_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn extra_flags(&self) -> &[String] {
        self.extra_flags.as_deref().unwrap_or_default()
    }

    /// Merge another settings block into this one (other takes precedence).
    pub fn merge(&mut self, other: ToolchainSettings) {
        if other.cc.is_some() {
            self.cc = other.cc;
        }
        if other.cxx.is_some() {
            self.cxx = other.cxx;
        }
        if other.go.is_some() {
            self.go = other.go;
        }
        if other.goarch.is_some() {
            self.goarch = other.goarch;
        }
        if other.export_def.is_some() {
            self.export_def = other.export_def;
        }
        if other.cxx_markers.is_some() {
            self.cxx_markers = other.cxx_markers;
        }
        if other.extra_flags.is_some() {
            self.extra_flags = other.extra_flags;
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read toolchain config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize toolchain config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write toolchain config: {}", path.display()))?;

        Ok(())
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.toolchain.merge(other.toolchain);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.crossbuild/toolchain.toml)
/// 2. Global config (~/.crossbuild/toolchain.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Load configuration for a project directory from the standard locations.
pub fn load_project_config(project_root: &Path) -> Config {
    let global = global_config_path();
    load_config(global.as_deref(), &project_config_path(project_root))
}

/// Get the global config directory (~/.crossbuild).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".crossbuild"))
}

/// Get the global config path (~/.crossbuild/toolchain.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("toolchain.toml"))
}

/// Get the project config path (.crossbuild/toolchain.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".crossbuild").join("toolchain.toml")
}
