//! `crossbuild build` command

use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::BuildArgs;
use crossbuild::compiler::invocation::output_file_name;
use crossbuild::{create_compiler, BuildDescriptor};

pub fn execute(args: BuildArgs) -> Result<()> {
    let project_dir = args.project_dir.canonicalize().with_context(|| {
        format!(
            "project directory not found: {}",
            args.project_dir.display()
        )
    })?;

    let settings = args.toolchain.resolve(&project_dir);
    let mut compiler = create_compiler(args.backend, &settings, None);

    let (kind, mode) = compiler.is_type_supported(&args.kind)?;
    tracing::debug!("Using {} backend for {} ({:?})", args.backend, kind, mode);

    let descriptor = BuildDescriptor::new(&project_dir, args.target_os)
        .with_build_mode(mode)
        .with_imports(args.imports)
        .with_artifacts(args.artifacts);

    compiler.prepare_build(&descriptor)?;

    if args.plan {
        let cmd = compiler.plan(&args.payload, &args.output)?;
        println!("{}", serde_json::to_string_pretty(&cmd)?);
        return Ok(());
    }

    let stdout = compiler
        .build(&args.payload, &args.output)
        .with_context(|| format!("failed to build `{}`", args.payload.display()))?;

    std::io::stdout()
        .write_all(&stdout)
        .context("failed to write toolchain output")?;

    tracing::info!(
        "Finished {} {}",
        kind,
        project_dir.join(output_file_name(&args.output)?).display()
    );

    Ok(())
}
