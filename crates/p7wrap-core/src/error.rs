//! Error types for archiver operations.

use thiserror::Error;

use crate::command::Command;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the external archiver.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or arguments were rejected before the archiver ran.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The archiver executable could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that was being started.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The archiver exited with a non-zero status.
    #[error("{program} {command} exited with {}", status_display(.status))]
    Execution {
        /// Program that was run.
        program: String,
        /// Command that was requested.
        command: Command,
        /// Exit code, or `None` if the process was terminated by a signal.
        status: Option<i32>,
        /// Captured standard output.
        output: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The archiver output could not be interpreted.
    #[error("cannot parse archiver output: {0}")]
    Parse(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_display(status: &Option<i32>) -> String {
    status.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |code| format!("exit code {code}"),
    )
}

impl Error {
    /// Returns `true` if the request was rejected before the archiver ran.
    ///
    /// # Examples
    ///
    /// ```
    /// use p7wrap_core::Error;
    ///
    /// let err = Error::Validation("no files given".into());
    /// assert!(err.is_validation());
    /// assert!(!err.is_execution());
    /// ```
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` if the archiver could not be started or failed.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::Execution { .. })
    }

    /// Returns `true` if the archiver ran but its output was not understood.
    ///
    /// The archive may already have been modified when this is returned.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns the captured standard output of a failed execution.
    ///
    /// # Examples
    ///
    /// ```
    /// use p7wrap_core::Command;
    /// use p7wrap_core::Error;
    ///
    /// let err = Error::Execution {
    ///     program: "7za".into(),
    ///     command: Command::Test,
    ///     status: Some(2),
    ///     output: "ERRORS:\nData error".into(),
    ///     stderr: String::new(),
    /// };
    /// assert_eq!(err.output(), Some("ERRORS:\nData error"));
    /// assert_eq!(Error::Parse("x".into()).output(), None);
    /// ```
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Execution { output, .. } => Some(output),
            _ => None,
        }
    }
}
