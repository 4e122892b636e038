//! High-level public API using the default archiver.
//!
//! Each function runs `7za` from `PATH` with lenient listing parsing. Use
//! [`Archiver`] to choose the executable, the parse mode, or a custom
//! [`ProcessRunner`](crate::ProcessRunner).

use crate::ArchiveConfig;
use crate::Archiver;
use crate::Result;
use crate::inspection::ArchiveManifest;
use crate::inspection::VerificationResult;

/// Adds files to an archive, creating it if needed.
///
/// # Arguments
///
/// * `config` - Archive path and add options
/// * `files` - Names to add, relative to `config.dir` when set
///
/// # Errors
///
/// Returns an error if:
/// - `files` is empty or the configuration is invalid
/// - The archiver cannot be started or exits unsuccessfully
///
/// # Examples
///
/// ```no_run
/// use p7wrap_core::ArchiveConfig;
/// use p7wrap_core::add;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ArchiveConfig::new("backup.7z")
///     .with_dir("/srv/data")
///     .with_recursive(true);
/// add(&config, &["reports", "index.html"])?;
/// # Ok(())
/// # }
/// ```
pub fn add<S: AsRef<str>>(config: &ArchiveConfig, files: &[S]) -> Result<String> {
    Archiver::new().add(config, files)
}

/// Extracts an archive into `config.output_dir` (or the current directory).
///
/// # Errors
///
/// Returns an error if:
/// - The archive is missing or unreadable
/// - The output directory is not writable
/// - The archiver cannot be started or exits unsuccessfully
pub fn extract(config: &ArchiveConfig) -> Result<String> {
    Archiver::new().extract(config)
}

/// Lists the contents of an archive.
///
/// # Errors
///
/// Returns an error if the archive is missing or unreadable, or if the
/// archiver cannot be started or exits unsuccessfully.
///
/// # Examples
///
/// ```no_run
/// use p7wrap_core::ArchiveConfig;
/// use p7wrap_core::list;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let manifest = list(&ArchiveConfig::new("backup.7z"))?;
/// for entry in &manifest.entries {
///     println!("{} ({} bytes)", entry.path, entry.size);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list(config: &ArchiveConfig) -> Result<ArchiveManifest> {
    Archiver::new().list(config)
}

/// Tests the integrity of an archive.
///
/// # Errors
///
/// Returns an error if the archive is missing or unreadable, the archiver
/// cannot be started, or its output cannot be interpreted. A damaged
/// archive is not an error: it yields [`VerificationResult::Failed`].
pub fn verify(config: &ArchiveConfig) -> Result<VerificationResult> {
    Archiver::new().verify(config)
}

/// Deletes files from an archive.
///
/// # Errors
///
/// Returns an error if:
/// - `files` is empty
/// - The archive is missing or unreadable
/// - The archiver cannot be started or exits unsuccessfully
pub fn delete<S: AsRef<str>>(config: &ArchiveConfig, files: &[S]) -> Result<String> {
    Archiver::new().delete(config, files)
}
