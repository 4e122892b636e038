//! Running the archiver executable.
//!
//! [`ProcessRunner`] is the seam between request orchestration and the
//! operating system. [`SystemRunner`] spawns the real executable; tests
//! substitute a recording runner.

use std::path::PathBuf;
use std::process::Stdio;

use crate::Command;
use crate::Error;
use crate::Result;
use crate::args::redact;

/// Archiver executable used when none is configured.
pub const DEFAULT_PROGRAM: &str = "7za";

/// A single archiver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Command letter passed first.
    pub command: Command,
    /// Arguments produced by [`build_args`](crate::build_args).
    pub args: Vec<String>,
    /// Explicit file names appended after the arguments.
    pub files: Vec<String>,
    /// Working directory for the child process. `None` inherits ours.
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Creates an invocation with no files and an inherited directory.
    #[must_use]
    pub fn new(command: Command, args: Vec<String>) -> Self {
        Self {
            command,
            args,
            files: Vec::new(),
            current_dir: None,
        }
    }

    /// Sets the explicit file list.
    #[must_use]
    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    /// Sets the child's working directory.
    #[must_use]
    pub fn with_current_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.current_dir = dir;
        self
    }

    /// Returns the full argument vector: command letter, arguments, files.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(1 + self.args.len() + self.files.len());
        argv.push(self.command.as_str().to_string());
        argv.extend(self.args.iter().cloned());
        argv.extend(self.files.iter().cloned());
        argv
    }
}

/// Executes archiver invocations.
///
/// Implementations block until the process exits and return its captured
/// standard output.
pub trait ProcessRunner {
    /// Runs the invocation.
    ///
    /// # Errors
    ///
    /// - [`Error::Spawn`] if the program cannot be started
    /// - [`Error::Execution`] if it exits with a non-zero status
    fn run(&self, invocation: &Invocation) -> Result<String>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        (**self).run(invocation)
    }
}

/// Runs the archiver as a child process of the current process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemRunner {
    program: PathBuf,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl SystemRunner {
    /// Creates a runner for `program`, resolved through `PATH` if relative.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the program this runner starts.
    #[must_use]
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        let program = self.program.display().to_string();
        let argv = invocation.argv();

        tracing::debug!(
            program = %program,
            args = ?redact(&argv),
            cwd = ?invocation.current_dir,
            "running archiver"
        );

        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&argv).stdin(Stdio::null());
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| {
            tracing::warn!(program = %program, error = %source, "failed to start archiver");
            Error::Spawn {
                program: program.clone(),
                source,
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let status = output.status.code();
            tracing::warn!(
                program = %program,
                command = %invocation.command,
                ?status,
                "archiver exited unsuccessfully"
            );
            return Err(Error::Execution {
                program,
                command: invocation.command,
                status,
                output: stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        tracing::debug!(bytes = stdout.len(), "archiver finished");
        Ok(stdout)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_order() {
        let invocation = Invocation::new(
            Command::Add,
            vec!["a.7z".into(), String::new(), "-y".into(), "-bd".into()],
        )
        .with_files(vec!["one.txt".into(), "two.txt".into()]);

        assert_eq!(
            invocation.argv(),
            ["a", "a.7z", "", "-y", "-bd", "one.txt", "two.txt"]
        );
    }

    #[test]
    fn test_default_program() {
        assert_eq!(SystemRunner::default().program(), std::path::Path::new("7za"));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let runner = SystemRunner::new("/nonexistent/p7wrap/7za");
        let err = runner
            .run(&Invocation::new(Command::List, Vec::new()))
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert!(err.is_execution());
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        // `echo` stands in for the archiver: it prints its arguments.
        let runner = SystemRunner::new("echo");
        let out = runner
            .run(&Invocation::new(Command::Test, vec!["x.7z".into()]))
            .unwrap();
        assert_eq!(out.trim_end(), "t x.7z");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_execution_error() {
        let runner = SystemRunner::new("false");
        let err = runner
            .run(&Invocation::new(Command::Test, Vec::new()))
            .unwrap_err();
        match err {
            Error::Execution {
                command, status, ..
            } => {
                assert_eq!(command, Command::Test);
                assert_eq!(status, Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
