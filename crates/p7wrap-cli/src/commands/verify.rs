//! Verify command implementation.

use super::CommandContext;
use crate::cli::VerifyArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use p7wrap_core::ArchiveConfig;
use std::process::ExitCode;

/// Returns a failure exit code when the archive does not test cleanly.
pub fn execute(
    args: &VerifyArgs,
    ctx: &CommandContext,
    formatter: &dyn OutputFormatter,
) -> Result<ExitCode> {
    let mut config = ArchiveConfig::new(&args.archive);
    if let Some(password) = &args.password {
        config = config.with_password(password);
    }

    let result = add_archive_context(
        ctx.run(format!("Testing {}", args.archive.display()), |archiver| {
            archiver.verify(&config)
        }),
        &args.archive,
    )?;

    formatter.format_verification_result(&args.archive, &result)?;

    if result.is_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
