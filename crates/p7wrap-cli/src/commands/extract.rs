//! Extract command implementation.

use super::CommandContext;
use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use p7wrap_core::ArchiveConfig;
use std::env;

pub fn execute(
    args: &ExtractArgs,
    ctx: &CommandContext,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut config = ArchiveConfig::new(&args.archive)
        .with_output_dir(&output_dir)
        .with_recursive(args.recursive);
    if let Some(password) = &args.password {
        config = config.with_password(password);
    }
    if let Some(dir) = &args.working_dir {
        config = config.with_working_dir(dir);
    }

    let output = add_archive_context(
        ctx.run(format!("Extracting {}", args.archive.display()), |archiver| {
            archiver.extract(&config)
        }),
        &args.archive,
    )?;

    formatter.format_extract_result(&args.archive, &output_dir, &output)?;

    Ok(())
}
