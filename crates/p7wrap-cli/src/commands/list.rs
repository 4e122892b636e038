//! List command implementation.

use super::CommandContext;
use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use p7wrap_core::ArchiveConfig;
use p7wrap_core::ParseMode;

pub fn execute(args: &ListArgs, ctx: &CommandContext, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = ArchiveConfig::new(&args.archive);
    let mode = if args.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let manifest = add_archive_context(
        ctx.run(format!("Listing {}", args.archive.display()), |archiver| {
            archiver.clone().with_parse_mode(mode).list(&config)
        }),
        &args.archive,
    )?;

    if manifest.is_empty() && manifest.path.is_empty() {
        formatter.format_warning("archiver output contained no listing; use --strict to fail instead");
    }

    if args.long {
        formatter.format_manifest_long(&manifest, args.human_readable)?;
    } else {
        formatter.format_manifest_short(&manifest)?;
    }

    Ok(())
}
