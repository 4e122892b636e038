//! Archiver command letters.

use std::fmt;

/// A command understood by the 7-Zip command-line archiver.
///
/// The archiver selects its operation from a single letter passed as the
/// first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `a`: add files to an archive.
    Add,
    /// `b`: run the built-in benchmark.
    Benchmark,
    /// `d`: delete files from an archive.
    Delete,
    /// `l`: list archive contents.
    List,
    /// `t`: test archive integrity.
    Test,
    /// `u`: update files in an archive.
    Update,
    /// `x`: extract with full paths.
    Extract,
}

impl Command {
    /// Returns the command letter passed to the archiver.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "a",
            Self::Benchmark => "b",
            Self::Delete => "d",
            Self::List => "l",
            Self::Test => "t",
            Self::Update => "u",
            Self::Extract => "x",
        }
    }

    /// Returns a human-readable name for log and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Benchmark => "benchmark",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Test => "test",
            Self::Update => "update",
            Self::Extract => "extract",
        }
    }

    /// Returns `true` if the command takes an explicit file list.
    #[must_use]
    pub const fn takes_files(self) -> bool {
        matches!(self, Self::Add | Self::Delete | Self::Update)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
