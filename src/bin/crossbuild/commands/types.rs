//! `crossbuild types` command

use anyhow::Result;

use crate::cli::TypesArgs;
use crossbuild::{create_compiler, ToolchainSettings};

pub fn execute(args: TypesArgs) -> Result<()> {
    let compiler = create_compiler(args.backend, &ToolchainSettings::default(), None);
    let (kind, mode) = compiler.is_type_supported(&args.kind)?;

    println!("kind: {}", kind);
    println!("mode: {}", mode.as_go_mode());

    Ok(())
}
