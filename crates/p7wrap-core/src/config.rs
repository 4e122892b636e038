//! Request configuration for archiver operations.

use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::Result;
use crate::fs;

/// Lowest compression level accepted by the archiver (store).
pub const COMPRESSION_MIN: i32 = 0;

/// Highest compression level accepted by the archiver (ultra).
pub const COMPRESSION_MAX: i32 = 9;

/// Compression level used when none is configured.
pub const COMPRESSION_DEFAULT: i32 = 4;

/// Upper bound for the thread count passed to the archiver.
pub const THREADS_MAX: i32 = 128;

/// Configuration for a single archiver request.
///
/// A plain value: build one per call with [`ArchiveConfig::new`] and the
/// `with_*` setters, or with struct update syntax.
///
/// # Examples
///
/// ```
/// use p7wrap_core::ArchiveConfig;
///
/// let config = ArchiveConfig::new("backup.7z")
///     .with_compression(9)
///     .with_threads(4)
///     .with_recursive(true);
///
/// assert_eq!(config.compression_level(), 9);
/// assert_eq!(config.thread_count(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Directory that relative file paths are resolved against (add only).
    ///
    /// Passed to the archiver process as its working directory; the
    /// caller's current directory is never changed.
    pub dir: Option<PathBuf>,

    /// Archive path.
    pub archive: PathBuf,

    /// File listing names to include.
    pub include_file: Option<PathBuf>,

    /// Exclude pattern. Takes precedence over `exclude_file`.
    pub exclude: Option<String>,

    /// File listing names to exclude.
    pub exclude_file: Option<PathBuf>,

    /// Compression level (0-9). `0` selects [`COMPRESSION_DEFAULT`].
    pub compression: i32,

    /// Output directory for extraction.
    pub output_dir: Option<PathBuf>,

    /// Archive password.
    pub password: Option<String>,

    /// Number of CPU threads (1-128). Values below 1 mean a single thread.
    pub threads: i32,

    /// Recurse into subdirectories.
    pub recursive: bool,

    /// Working directory for the archiver's temporary files.
    pub working_dir: Option<PathBuf>,

    /// Delete source files once they have been added.
    pub delete_after: bool,
}

/// Which checks [`ArchiveConfig::validate`] applies to the archive itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationScope {
    /// The archive may not exist yet (add).
    NewArchive,
    /// The archive must exist and be readable.
    ExistingArchive,
}

impl ArchiveConfig {
    /// Creates a configuration for `archive` with default compression.
    #[must_use]
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            compression: COMPRESSION_DEFAULT,
            ..Self::default()
        }
    }

    /// Sets the directory relative file paths are resolved against.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Sets the include-list file.
    #[must_use]
    pub fn with_include_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_file = Some(path.into());
        self
    }

    /// Sets the exclude pattern.
    #[must_use]
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    /// Sets the exclude-list file.
    #[must_use]
    pub fn with_exclude_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude_file = Some(path.into());
        self
    }

    /// Sets the compression level. Out-of-range values are clamped when
    /// arguments are built.
    #[must_use]
    pub fn with_compression(mut self, level: i32) -> Self {
        self.compression = level;
        self
    }

    /// Sets the extraction output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the archive password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the thread count.
    #[must_use]
    pub fn with_threads(mut self, threads: i32) -> Self {
        self.threads = threads;
        self
    }

    /// Sets whether to recurse into subdirectories.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the archiver's working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Sets whether source files are deleted after being added.
    #[must_use]
    pub fn with_delete_after(mut self, delete: bool) -> Self {
        self.delete_after = delete;
        self
    }

    /// Returns the compression level passed to the archiver.
    ///
    /// `0` maps to [`COMPRESSION_DEFAULT`]; anything else is clamped to
    /// `[COMPRESSION_MIN, COMPRESSION_MAX]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use p7wrap_core::ArchiveConfig;
    ///
    /// assert_eq!(ArchiveConfig::default().compression_level(), 4);
    /// assert_eq!(ArchiveConfig::default().with_compression(42).compression_level(), 9);
    /// assert_eq!(ArchiveConfig::default().with_compression(-3).compression_level(), 0);
    /// ```
    #[must_use]
    pub fn compression_level(&self) -> i32 {
        if self.compression == 0 {
            COMPRESSION_DEFAULT
        } else {
            self.compression.clamp(COMPRESSION_MIN, COMPRESSION_MAX)
        }
    }

    /// Returns the thread count passed to the archiver, in `[1, THREADS_MAX]`.
    #[must_use]
    pub fn thread_count(&self) -> i32 {
        self.threads.clamp(1, THREADS_MAX)
    }

    /// Checks the configuration against the filesystem.
    ///
    /// - the archive must exist and be readable for
    ///   [`ValidationScope::ExistingArchive`]
    /// - include and exclude files must exist and be readable when set
    /// - the output directory must be writable when set
    /// - `dir` must be an existing directory when set
    /// - every path must be valid UTF-8
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first failed check.
    pub fn validate(&self, scope: ValidationScope) -> Result<()> {
        require_utf8("archive", &self.archive)?;
        if self.archive.as_os_str().is_empty() {
            return Err(Error::Validation("archive path is empty".into()));
        }

        if scope == ValidationScope::ExistingArchive {
            require_readable_file("archive", &self.archive)?;
        }

        if let Some(include) = &self.include_file {
            require_utf8("include file", include)?;
            require_readable_file("include file", include)?;
        }

        if let Some(exclude) = &self.exclude_file {
            require_utf8("exclude file", exclude)?;
            require_readable_file("exclude file", exclude)?;
        }

        if let Some(output) = &self.output_dir {
            require_utf8("output directory", output)?;
            if !fs::is_writable(output) {
                return Err(Error::Validation(format!(
                    "output directory {} is not writable",
                    output.display()
                )));
            }
        }

        if let Some(dir) = &self.dir
            && !dir.is_dir()
        {
            return Err(Error::Validation(format!(
                "source directory {} does not exist",
                dir.display()
            )));
        }

        if let Some(working) = &self.working_dir {
            require_utf8("working directory", working)?;
        }

        Ok(())
    }
}

fn require_utf8(what: &str, path: &Path) -> Result<()> {
    if path.to_str().is_none() {
        return Err(Error::Validation(format!(
            "{what} path is not valid UTF-8: {}",
            path.display()
        )));
    }
    Ok(())
}

fn require_readable_file(what: &str, path: &Path) -> Result<()> {
    if !fs::exists(path) {
        return Err(Error::Validation(format!(
            "{what} {} does not exist",
            path.display()
        )));
    }
    if !fs::is_readable(path) {
        return Err(Error::Validation(format!(
            "{what} {} is not readable",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use tempfile::TempDir;

    #[test]
    fn test_new_uses_default_compression() {
        let config = ArchiveConfig::new("data.7z");
        assert_eq!(config.archive, PathBuf::from("data.7z"));
        assert_eq!(config.compression, COMPRESSION_DEFAULT);
        assert!(!config.recursive);
        assert!(config.password.is_none());
    }

    #[test]
    fn test_compression_level_bounds() {
        let config = ArchiveConfig::default();
        assert_eq!(config.compression_level(), 4);
        assert_eq!(config.clone().with_compression(1).compression_level(), 1);
        assert_eq!(config.clone().with_compression(9).compression_level(), 9);
        assert_eq!(config.clone().with_compression(10).compression_level(), 9);
        assert_eq!(config.with_compression(-1).compression_level(), 0);
    }

    #[test]
    fn test_thread_count_bounds() {
        let config = ArchiveConfig::default();
        assert_eq!(config.thread_count(), 1);
        assert_eq!(config.clone().with_threads(-5).thread_count(), 1);
        assert_eq!(config.clone().with_threads(8).thread_count(), 8);
        assert_eq!(config.with_threads(500).thread_count(), 128);
    }

    #[test]
    fn test_validate_existing_archive_missing() {
        let config = ArchiveConfig::new("/nonexistent/p7wrap/archive.7z");
        let err = config.validate(ValidationScope::ExistingArchive).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_new_archive_missing_ok() {
        let config = ArchiveConfig::new("/nonexistent/p7wrap/archive.7z");
        assert!(config.validate(ValidationScope::NewArchive).is_ok());
    }

    #[test]
    fn test_validate_empty_archive_path() {
        let config = ArchiveConfig::default();
        assert!(config.validate(ValidationScope::NewArchive).unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_existing_archive_ok() {
        let archive = NamedTempFile::new().unwrap();
        let config = ArchiveConfig::new(archive.path());
        assert!(config.validate(ValidationScope::ExistingArchive).is_ok());
    }

    #[test]
    fn test_validate_missing_include_file() {
        let config = ArchiveConfig::new("out.7z").with_include_file("/nonexistent/include.lst");
        let err = config.validate(ValidationScope::NewArchive).unwrap_err();
        assert!(err.to_string().contains("include file"));
    }

    #[test]
    fn test_validate_missing_exclude_file() {
        let config = ArchiveConfig::new("out.7z").with_exclude_file("/nonexistent/exclude.lst");
        let err = config.validate(ValidationScope::NewArchive).unwrap_err();
        assert!(err.to_string().contains("exclude file"));
    }

    #[test]
    fn test_validate_output_dir() {
        let archive = NamedTempFile::new().unwrap();
        let out = TempDir::new().unwrap();

        let config = ArchiveConfig::new(archive.path()).with_output_dir(out.path());
        assert!(config.validate(ValidationScope::ExistingArchive).is_ok());

        let config = ArchiveConfig::new(archive.path()).with_output_dir("/nonexistent/p7wrap/out");
        let err = config.validate(ValidationScope::ExistingArchive).unwrap_err();
        assert!(err.to_string().contains("not writable"));
    }

    #[test]
    fn test_validate_missing_source_dir() {
        let config = ArchiveConfig::new("out.7z").with_dir("/nonexistent/p7wrap/src");
        let err = config.validate(ValidationScope::NewArchive).unwrap_err();
        assert!(err.to_string().contains("source directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let config = ArchiveConfig::new(Path::new(OsStr::from_bytes(b"bad\xffname.7z")));
        let err = config.validate(ValidationScope::NewArchive).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
