//! C/C++ backend driving a MinGW cross compiler.

use std::path::Path;
use std::sync::Arc;

use crate::core::descriptor::BuildDescriptor;
use crate::util::config::ToolchainSettings;
use crate::util::process::{ProcessRunner, SystemRunner};

use super::error::{CompilerError, Result};
use super::invocation::{build_invocation, CommandSpec};
use super::selector::{LanguageDetector, ToolchainConfig, ToolchainSelector};
use super::{BackendId, Compiler};

/// C/C++ compiler backend.
pub struct CCompiler {
    selector: ToolchainSelector,
    runner: Arc<dyn ProcessRunner>,
    config: Option<ToolchainConfig>,
}

impl CCompiler {
    /// Create a backend that runs real processes.
    pub fn new(settings: &ToolchainSettings) -> Self {
        CCompiler {
            selector: ToolchainSelector::new(settings),
            runner: Arc::new(SystemRunner::new()),
            config: None,
        }
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the C++ detector.
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.selector = self.selector.with_detector(detector);
        self
    }

    /// The prepared configuration, if any.
    pub fn config(&self) -> Option<&ToolchainConfig> {
        self.config.as_ref()
    }
}

impl Compiler for CCompiler {
    fn backend(&self) -> BackendId {
        BackendId::C
    }

    fn prepare_build(&mut self, descriptor: &BuildDescriptor) -> Result<()> {
        self.config = Some(self.selector.prepare(descriptor));
        Ok(())
    }

    fn plan(&self, payload: &Path, dest: &Path) -> Result<CommandSpec> {
        let config = self.config.as_ref().ok_or(CompilerError::NotPrepared)?;
        build_invocation(config, payload, dest)
    }

    fn build(&mut self, payload: &Path, dest: &Path) -> Result<Vec<u8>> {
        let cmd = self.plan(payload, dest)?;
        self.config = None;

        tracing::info!(
            "Compiling {} -> {}",
            payload.display(),
            dest.display()
        );

        self.runner.run(&cmd)
    }
}
