//! Error conversion utilities for CLI.
//!
//! Converts p7wrap-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use p7wrap_core::Error;
use std::io;
use std::path::Path;

/// Exit code the archiver uses for a fatal error.
const EXIT_FATAL: i32 = 2;
/// Exit code the archiver uses for a command line error.
const EXIT_USAGE: i32 = 7;
/// Exit code the archiver uses when it runs out of memory.
const EXIT_MEMORY: i32 = 8;

/// Converts a core `Error` to a user-friendly anyhow error with context
pub fn convert_error(err: Error, archive: &Path) -> anyhow::Error {
    match err {
        Error::Validation(reason) => {
            anyhow!(
                "Invalid request for '{}': {}\n\
                 HINT: Check that the archive and any list files exist and are readable.",
                archive.display(),
                reason
            )
        }
        Error::Spawn { program, source } if source.kind() == io::ErrorKind::NotFound => {
            anyhow!(
                "Archiver '{program}' not found: {source}\n\
                 HINT: Install p7zip (it provides 7za) or point --binary at the executable."
            )
        }
        Error::Spawn { program, source } => {
            anyhow!(
                "Cannot start archiver '{program}': {source}\n\
                 HINT: Check that --binary names an executable file."
            )
        }
        Error::Execution {
            program,
            command,
            status,
            output,
            stderr,
        } => {
            let mut message = format!(
                "'{program}' failed to {} '{}' ({})",
                command.name(),
                archive.display(),
                status.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"))
            );
            if let Some(line) = last_line(&stderr).or_else(|| last_line(&output)) {
                message.push_str("\n  ");
                message.push_str(line);
            }
            let hint = match status {
                Some(EXIT_FATAL) => "The archive may be damaged, or the password may be wrong.",
                Some(EXIT_USAGE) => "The archiver rejected its command line; check the options given.",
                Some(EXIT_MEMORY) => "The archiver ran out of memory; try fewer --threads.",
                _ => "Run with --verbose to see the full archiver command.",
            };
            anyhow!("{message}\nHINT: {hint}")
        }
        Error::Parse(reason) => {
            anyhow!(
                "Unexpected archiver output for '{}': {}\n\
                 HINT: Make sure --binary points at a 7-Zip compatible archiver.",
                archive.display(),
                reason
            )
        }
        Error::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds archive context to a core result
pub fn add_archive_context<T>(result: p7wrap_core::Result<T>, archive: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_error(e, archive))
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rfind(|l| !l.is_empty())
}
