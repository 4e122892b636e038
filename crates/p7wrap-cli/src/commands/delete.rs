//! Delete command implementation.

use super::CommandContext;
use crate::cli::DeleteArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use p7wrap_core::ArchiveConfig;

pub fn execute(
    args: &DeleteArgs,
    ctx: &CommandContext,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut config = ArchiveConfig::new(&args.archive).with_recursive(args.recursive);
    if let Some(password) = &args.password {
        config = config.with_password(password);
    }

    let output = add_archive_context(
        ctx.run(format!("Deleting from {}", args.archive.display()), |archiver| {
            archiver.delete(&config, &args.files)
        }),
        &args.archive,
    )?;

    formatter.format_delete_result(&args.archive, &args.files, &output)?;

    Ok(())
}
