//! `crossbuild toolchain` command

use std::path::Path;

use anyhow::Result;

use crate::cli::{ToolchainArgs, ToolchainCommands, ToolchainShowArgs};
use crossbuild::util::config::{global_config_path, project_config_path};
use crossbuild::util::process::find_executable;

pub fn execute(args: ToolchainArgs) -> Result<()> {
    match args.command {
        ToolchainCommands::Show(show_args) => show_toolchain(show_args),
    }
}

fn show_toolchain(args: ToolchainShowArgs) -> Result<()> {
    let settings = args.toolchain.resolve(&args.project_dir);

    println!("Toolchain:");
    println!();
    print_tool("CC", &settings.cc());
    print_tool("CXX", &settings.cxx());
    print_tool("GO", &settings.go());
    println!();
    println!("  GOARCH:      {}", settings.goarch());
    println!("  Export def:  {}", settings.export_def().display());
    println!("  C++ markers: {}", settings.cxx_markers().join(", "));
    if !settings.extra_flags().is_empty() {
        println!("  Extra flags: {}", settings.extra_flags().join(" "));
    }

    println!();
    println!("Config files:");
    if let Some(global) = global_config_path() {
        print_config_file("global", &global);
    }
    print_config_file("project", &project_config_path(&args.project_dir));

    Ok(())
}

fn print_tool(name: &str, path: &Path) {
    match find_executable(path) {
        Some(found) => println!("  {:<4} {}", format!("{}:", name), found.display()),
        None => println!("  {:<4} {} (not found)", format!("{}:", name), path.display()),
    }
}

fn print_config_file(label: &str, path: &Path) {
    let state = if path.exists() { "" } else { " (missing)" };
    println!("  {:<8} {}{}", format!("{}:", label), path.display(), state);
}
