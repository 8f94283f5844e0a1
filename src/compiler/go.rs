//! Go backend.
//!
//! Cross compilation is driven by `GOOS`/`GOARCH` in the environment;
//! shared libraries go through cgo and the configured C cross compiler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::descriptor::BuildDescriptor;
use crate::util::config::ToolchainSettings;
use crate::util::process::{ProcessRunner, SystemRunner};

use super::error::{CompilerError, Result};
use super::invocation::{build_invocation, CommandSpec};
use super::selector::ToolchainConfig;
use super::{BackendId, Compiler};

/// Go compiler backend.
pub struct GoCompiler {
    go: PathBuf,
    goarch: String,
    cc: PathBuf,
    runner: Arc<dyn ProcessRunner>,
    config: Option<ToolchainConfig>,
}

impl GoCompiler {
    pub fn new(settings: &ToolchainSettings) -> Self {
        GoCompiler {
            go: settings.go(),
            goarch: settings.goarch(),
            cc: settings.cc(),
            runner: Arc::new(SystemRunner::new()),
            config: None,
        }
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn config(&self) -> Option<&ToolchainConfig> {
        self.config.as_ref()
    }

    fn select(&self, descriptor: &BuildDescriptor) -> ToolchainConfig {
        let mut flags: Vec<String> = ["build", "-trimpath", "-ldflags", "-s -w"]
            .iter()
            .map(|f| f.to_string())
            .collect();

        let mut env = vec![
            ("GOOS".to_string(), descriptor.target_os.as_goos().to_string()),
            ("GOARCH".to_string(), self.goarch.clone()),
        ];

        if descriptor.build_mode.is_shared() {
            flags.push(format!("-buildmode={}", descriptor.build_mode.as_go_mode()));
            env.push(("CGO_ENABLED".to_string(), "1".to_string()));
            env.push(("CC".to_string(), self.cc.display().to_string()));
        } else {
            env.push(("CGO_ENABLED".to_string(), "0".to_string()));
        }

        ToolchainConfig {
            project_dir: descriptor.project_dir.clone(),
            target_os: descriptor.target_os,
            toolchain_path: self.go.clone(),
            flags,
            env,
            export_definition: None,
            artifacts: descriptor.artifacts.clone(),
        }
    }
}

impl Compiler for GoCompiler {
    fn backend(&self) -> BackendId {
        BackendId::Go
    }

    fn prepare_build(&mut self, descriptor: &BuildDescriptor) -> Result<()> {
        let config = self.select(descriptor);
        tracing::debug!("Go build flags: {}", config.flags.join(" "));
        self.config = Some(config);
        Ok(())
    }

    fn plan(&self, payload: &Path, dest: &Path) -> Result<CommandSpec> {
        let config = self.config.as_ref().ok_or(CompilerError::NotPrepared)?;
        build_invocation(config, payload, dest)
    }

    fn build(&mut self, payload: &Path, dest: &Path) -> Result<Vec<u8>> {
        let cmd = self.plan(payload, dest)?;
        self.config = None;

        tracing::info!("Building {} -> {}", payload.display(), dest.display());

        self.runner.run(&cmd)
    }
}
