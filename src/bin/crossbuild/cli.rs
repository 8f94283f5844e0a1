//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crossbuild::util::config::load_project_config;
use crossbuild::{BackendId, TargetOs, ToolchainSettings};

/// crossbuild - cross-compile payloads with an external toolchain
#[derive(Parser)]
#[command(name = "crossbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a payload
    Build(BuildArgs),

    /// Check whether an artifact type is supported
    Types(TypesArgs),

    /// Toolchain inspection
    Toolchain(ToolchainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Toolchain overrides shared by commands that resolve a toolchain.
#[derive(Args, Debug, Clone, Default)]
pub struct ToolchainOverrides {
    /// C cross compiler path
    #[arg(long, env = "CROSSBUILD_CC")]
    pub cc: Option<PathBuf>,

    /// C++ cross compiler path
    #[arg(long, env = "CROSSBUILD_CXX")]
    pub cxx: Option<PathBuf>,

    /// Go binary path
    #[arg(long, env = "CROSSBUILD_GO")]
    pub go: Option<PathBuf>,

    /// Export definition template for forwarding DLLs
    #[arg(long)]
    pub export_def: Option<PathBuf>,
}

impl ToolchainOverrides {
    /// Config files for the project, with command-line overrides on top.
    pub fn resolve(&self, project_dir: &std::path::Path) -> ToolchainSettings {
        let mut settings = load_project_config(project_dir).toolchain;
        settings.merge(ToolchainSettings {
            cc: self.cc.clone(),
            cxx: self.cxx.clone(),
            go: self.go.clone(),
            export_def: self.export_def.clone(),
            ..Default::default()
        });
        settings
    }
}

#[derive(Args)]
pub struct BuildArgs {
    /// Payload source passed to the compiler, relative to the project directory
    pub payload: PathBuf,

    /// Destination artifact; only the file name is passed to the compiler
    #[arg(short, long)]
    pub output: PathBuf,

    /// Project directory the toolchain runs in
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Target operating system
    #[arg(long = "os", default_value = "windows")]
    pub target_os: TargetOs,

    /// Artifact type (exe or dll)
    #[arg(short = 't', long = "type", default_value = "exe")]
    pub kind: String,

    /// Detected import (repeatable)
    #[arg(long = "import")]
    pub imports: Vec<String>,

    /// Requested artifact variant, e.g. dllforward (repeatable)
    #[arg(long = "artifact")]
    pub artifacts: Vec<String>,

    /// Compiler backend
    #[arg(long, default_value = "c")]
    pub backend: BackendId,

    /// Print the invocation as JSON instead of running it
    #[arg(long)]
    pub plan: bool,

    #[command(flatten)]
    pub toolchain: ToolchainOverrides,
}

#[derive(Args)]
pub struct TypesArgs {
    /// Artifact type to check
    pub kind: String,

    /// Compiler backend
    #[arg(long, default_value = "c")]
    pub backend: BackendId,
}

#[derive(Args)]
pub struct ToolchainArgs {
    #[command(subcommand)]
    pub command: ToolchainCommands,
}

#[derive(Subcommand)]
pub enum ToolchainCommands {
    /// Show the effective toolchain configuration
    Show(ToolchainShowArgs),
}

#[derive(Args)]
pub struct ToolchainShowArgs {
    /// Project directory whose config is read
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(flatten)]
    pub toolchain: ToolchainOverrides,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
