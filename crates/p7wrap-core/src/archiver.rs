//! Request orchestration: validate, build arguments, run, interpret.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveConfig;
use crate::Command;
use crate::Error;
use crate::Result;
use crate::args::build_args;
use crate::config::ValidationScope;
use crate::inspection::ArchiveManifest;
use crate::inspection::ListingParser;
use crate::inspection::ParseMode;
use crate::inspection::VerificationResult;
use crate::inspection::interpret_test_output;
use crate::process::Invocation;
use crate::process::ProcessRunner;
use crate::process::SystemRunner;

/// Drives the external archiver for add, extract, list, verify and delete
/// requests.
///
/// Every call validates its [`ArchiveConfig`] first; a rejected request
/// never spawns a process.
///
/// # Examples
///
/// ```no_run
/// use p7wrap_core::ArchiveConfig;
/// use p7wrap_core::Archiver;
/// use p7wrap_core::ParseMode;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archiver = Archiver::with_program("/usr/bin/7za").with_parse_mode(ParseMode::Strict);
///
/// let config = ArchiveConfig::new("backup.7z").with_compression(7);
/// archiver.add(&config, &["notes.txt", "photos/"])?;
///
/// let manifest = archiver.list(&config)?;
/// println!("{} entries", manifest.total_entries());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Archiver<R: ProcessRunner = SystemRunner> {
    runner: R,
    parse_mode: ParseMode,
}

impl Archiver {
    /// Creates an archiver that runs `7za` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an archiver that runs the given executable.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self::with_runner(SystemRunner::new(program))
    }
}

impl<R: ProcessRunner> Archiver<R> {
    /// Creates an archiver backed by a custom process runner.
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            parse_mode: ParseMode::default(),
        }
    }

    /// Sets how listing output is parsed.
    #[must_use]
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    /// Returns the process runner.
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Returns the listing parse mode.
    #[must_use]
    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    /// Adds `files` to the archive and returns the archiver's output.
    ///
    /// Relative file names are resolved against `config.dir` when set,
    /// otherwise against the current directory. The archive path itself is
    /// always resolved against the current directory.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `files` is empty or the configuration is
    ///   rejected
    /// - [`Error::Io`] if a path cannot be made absolute
    /// - [`Error::Spawn`] or [`Error::Execution`] if the archiver fails
    pub fn add<S: AsRef<str>>(&self, config: &ArchiveConfig, files: &[S]) -> Result<String> {
        let files = file_list(files)?;
        config.validate(ValidationScope::NewArchive)?;

        let config = with_absolute_paths(config)?;
        let invocation = Invocation::new(Command::Add, build_args(&config, Command::Add))
            .with_files(files)
            .with_current_dir(config.dir.clone());

        self.runner.run(&invocation)
    }

    /// Extracts the archive and returns the archiver's output.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the archive is missing or unreadable, or
    ///   the output directory is not writable
    /// - [`Error::Io`] if a path cannot be made absolute
    /// - [`Error::Spawn`] or [`Error::Execution`] if the archiver fails
    pub fn extract(&self, config: &ArchiveConfig) -> Result<String> {
        config.validate(ValidationScope::ExistingArchive)?;

        let config = with_absolute_paths(config)?;
        let invocation = Invocation::new(Command::Extract, build_args(&config, Command::Extract));

        self.runner.run(&invocation)
    }

    /// Lists the archive and returns its parsed manifest.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the archive is missing or unreadable
    /// - [`Error::Spawn`] or [`Error::Execution`] if the archiver fails
    /// - [`Error::Parse`] if the listing is malformed in
    ///   [`ParseMode::Strict`]
    pub fn list(&self, config: &ArchiveConfig) -> Result<ArchiveManifest> {
        config.validate(ValidationScope::ExistingArchive)?;

        let invocation = Invocation::new(Command::List, build_args(config, Command::List));
        let output = self.runner.run(&invocation)?;

        ListingParser::new(self.parse_mode).parse(&output)
    }

    /// Tests the archive's integrity.
    ///
    /// The archiver exits non-zero when it finds data errors, so the output
    /// of a failed run is still interpreted. A damaged archive is reported
    /// as [`VerificationResult::Failed`], not as an error.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the archive is missing or unreadable
    /// - [`Error::Spawn`] if the archiver cannot be started
    /// - [`Error::Parse`] if the output has neither a success nor an error
    ///   line
    pub fn verify(&self, config: &ArchiveConfig) -> Result<VerificationResult> {
        config.validate(ValidationScope::ExistingArchive)?;

        let invocation = Invocation::new(Command::Test, build_args(config, Command::Test));
        let output = match self.runner.run(&invocation) {
            Ok(output) => output,
            Err(Error::Execution { output, status, .. }) => {
                tracing::debug!(?status, "interpreting output of failed test run");
                output
            }
            Err(e) => return Err(e),
        };

        let result = interpret_test_output(&output)?;
        tracing::debug!(archive = %config.archive.display(), %result, "verification finished");
        Ok(result)
    }

    /// Deletes `files` from the archive and returns the archiver's output.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `files` is empty or the archive is missing
    ///   or unreadable
    /// - [`Error::Spawn`] or [`Error::Execution`] if the archiver fails
    pub fn delete<S: AsRef<str>>(&self, config: &ArchiveConfig, files: &[S]) -> Result<String> {
        let files = file_list(files)?;
        config.validate(ValidationScope::ExistingArchive)?;

        let invocation = Invocation::new(Command::Delete, build_args(config, Command::Delete))
            .with_files(files);

        self.runner.run(&invocation)
    }
}

fn file_list<S: AsRef<str>>(files: &[S]) -> Result<Vec<String>> {
    if files.is_empty() {
        return Err(Error::Validation("no files given".into()));
    }
    Ok(files.iter().map(|f| f.as_ref().to_string()).collect())
}

/// Resolves every path the archiver opens against the caller's directory,
/// the same directory [`ArchiveConfig::validate`] checked them in.
fn with_absolute_paths(config: &ArchiveConfig) -> Result<ArchiveConfig> {
    let mut config = config.clone();
    config.archive = absolute(&config.archive)?;
    for path in [
        &mut config.include_file,
        &mut config.exclude_file,
        &mut config.output_dir,
        &mut config.working_dir,
    ]
    .into_iter()
    .flatten()
    {
        *path = absolute(path)?;
    }
    Ok(config)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::path::absolute(path)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use tempfile::NamedTempFile;
    use tempfile::TempDir;

    use super::*;

    enum Reply {
        Output(&'static str),
        Exit(i32, &'static str),
    }

    struct RecordingRunner {
        reply: Reply,
        calls: RefCell<Vec<Invocation>>,
    }

    impl RecordingRunner {
        fn replying(reply: Reply) -> Self {
            Self {
                reply,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn only_call(&self) -> Invocation {
            let calls = self.calls.borrow();
            assert_eq!(calls.len(), 1, "expected exactly one invocation");
            calls[0].clone()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation) -> Result<String> {
            self.calls.borrow_mut().push(invocation.clone());
            match self.reply {
                Reply::Output(text) => Ok(text.to_string()),
                Reply::Exit(code, text) => Err(Error::Execution {
                    program: "7za".into(),
                    command: invocation.command,
                    status: Some(code),
                    output: text.to_string(),
                    stderr: String::new(),
                }),
            }
        }
    }

    const LISTING: &str = "\
Listing archive: data.7z

--
Path = data.7z
Type = 7z
Solid = +
Blocks = 1

----------
Path = a.txt
Size = 12
Block = 0

";

    #[test]
    fn test_add_without_files_spawns_nothing() {
        let runner = RecordingRunner::replying(Reply::Output(""));
        let archiver = Archiver::with_runner(&runner);

        let err = archiver
            .add::<&str>(&ArchiveConfig::new("out.7z"), &[])
            .unwrap_err();

        assert!(err.is_validation());
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_add_uses_source_dir_and_absolute_archive() {
        let src = TempDir::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Output("Everything is Ok\n"));
        let archiver = Archiver::with_runner(&runner);

        let config = ArchiveConfig::new("out.7z")
            .with_dir(src.path())
            .with_compression(9);
        let output = archiver.add(&config, &["a.txt", "b.txt"]).unwrap();
        assert_eq!(output, "Everything is Ok\n");

        let call = runner.only_call();
        assert_eq!(call.command, Command::Add);
        assert_eq!(call.current_dir.as_deref(), Some(src.path()));
        assert_eq!(call.files, ["a.txt", "b.txt"]);

        let archive = Path::new(&call.args[0]);
        assert!(archive.is_absolute());
        assert!(archive.ends_with("out.7z"));
        assert!(call.args.contains(&"-mx=9".to_string()));
    }

    #[test]
    fn test_add_without_dir_inherits_cwd() {
        let runner = RecordingRunner::replying(Reply::Output(""));
        let archiver = Archiver::with_runner(&runner);

        archiver.add(&ArchiveConfig::new("/tmp/out.7z"), &["x"]).unwrap();

        let call = runner.only_call();
        assert!(call.current_dir.is_none());
        assert_eq!(call.args[0], "/tmp/out.7z");
    }

    #[test]
    fn test_extract_missing_archive() {
        let runner = RecordingRunner::replying(Reply::Output(""));
        let archiver = Archiver::with_runner(&runner);

        let err = archiver
            .extract(&ArchiveConfig::new("/nonexistent/p7wrap/a.7z"))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_extract_passes_output_dir() {
        let archive = NamedTempFile::new().unwrap();
        let out = TempDir::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Output("Everything is Ok\n"));
        let archiver = Archiver::with_runner(&runner);

        let config = ArchiveConfig::new(archive.path()).with_output_dir(out.path());
        archiver.extract(&config).unwrap();

        let call = runner.only_call();
        assert_eq!(call.command, Command::Extract);
        assert!(call.files.is_empty());
        assert!(call.args.contains(&format!("-o{}", out.path().display())));
    }

    #[test]
    fn test_list_parses_manifest() {
        let archive = NamedTempFile::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Output(LISTING));
        let archiver = Archiver::with_runner(&runner);

        let manifest = archiver.list(&ArchiveConfig::new(archive.path())).unwrap();

        assert_eq!(manifest.path, "data.7z");
        assert!(manifest.solid);
        assert_eq!(manifest.total_entries(), 1);
        assert_eq!(manifest.entries[0].size, 12);
        assert!(runner.only_call().args.contains(&"-slt".to_string()));
    }

    #[test]
    fn test_list_strict_mode_rejects_malformed_output() {
        let archive = NamedTempFile::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Output("no listing here\n"));
        let lenient = Archiver::with_runner(&runner);
        let strict = Archiver::with_runner(&runner).with_parse_mode(ParseMode::Strict);
        let config = ArchiveConfig::new(archive.path());

        assert!(lenient.list(&config).unwrap().is_empty());
        assert!(strict.list(&config).unwrap_err().is_parse());
    }

    #[test]
    fn test_list_propagates_execution_error() {
        let archive = NamedTempFile::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Exit(2, "Can not open the file as archive"));
        let archiver = Archiver::with_runner(&runner);

        let err = archiver.list(&ArchiveConfig::new(archive.path())).unwrap_err();
        assert!(err.is_execution());
        assert_eq!(err.output(), Some("Can not open the file as archive"));
    }

    #[test]
    fn test_verify_passed() {
        let archive = NamedTempFile::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Output("Testing\n\nEverything is Ok\n"));
        let archiver = Archiver::with_runner(&runner);

        let result = archiver.verify(&ArchiveConfig::new(archive.path())).unwrap();
        assert!(result.is_passed());
        assert_eq!(runner.only_call().command, Command::Test);
    }

    #[test]
    fn test_verify_interprets_failed_run() {
        let archive = NamedTempFile::new().unwrap();
        let runner =
            RecordingRunner::replying(Reply::Exit(2, "ERRORS:\nData error in file X\n"));
        let archiver = Archiver::with_runner(&runner);

        let result = archiver.verify(&ArchiveConfig::new(archive.path())).unwrap();
        assert_eq!(result.detail(), Some("Data error in file X"));
    }

    #[test]
    fn test_verify_unrecognised_output() {
        let archive = NamedTempFile::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Exit(7, "Command line error\n"));
        let archiver = Archiver::with_runner(&runner);

        let err = archiver.verify(&ArchiveConfig::new(archive.path())).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_verify_passes_password() {
        let archive = NamedTempFile::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Output("Everything is Ok\n"));
        let archiver = Archiver::with_runner(&runner);

        let config = ArchiveConfig::new(archive.path()).with_password("s3cret");
        archiver.verify(&config).unwrap();

        assert!(runner.only_call().args.contains(&"-ps3cret".to_string()));
    }

    #[test]
    fn test_delete() {
        let archive = NamedTempFile::new().unwrap();
        let runner = RecordingRunner::replying(Reply::Output("Everything is Ok\n"));
        let archiver = Archiver::with_runner(&runner);
        let config = ArchiveConfig::new(archive.path());

        assert!(archiver.delete::<String>(&config, &[]).unwrap_err().is_validation());
        assert!(runner.calls.borrow().is_empty());

        archiver.delete(&config, &["old.log".to_string()]).unwrap();
        let call = runner.only_call();
        assert_eq!(call.command, Command::Delete);
        assert_eq!(call.files, ["old.log"]);
    }

    #[test]
    fn test_with_program() {
        let archiver = Archiver::with_program("/opt/7zip/7za");
        assert_eq!(archiver.runner().program(), Path::new("/opt/7zip/7za"));
        assert_eq!(archiver.parse_mode(), ParseMode::Lenient);
        assert_eq!(Archiver::new().runner().program(), Path::new("7za"));
    }
}
