//! Command implementations.

pub mod add;
pub mod completion;
pub mod delete;
pub mod extract;
pub mod list;
pub mod verify;

use crate::progress::with_spinner;
use p7wrap_core::Archiver;
use std::path::Path;

/// State shared by every archiver-backed command.
pub struct CommandContext {
    pub archiver: Archiver,
    pub show_progress: bool,
}

impl CommandContext {
    pub fn new(binary: &Path, show_progress: bool) -> Self {
        Self {
            archiver: Archiver::with_program(binary),
            show_progress,
        }
    }

    /// Runs `f` behind a spinner when progress display is enabled.
    pub fn run<T>(&self, message: impl Into<String>, f: impl FnOnce(&Archiver) -> T) -> T {
        with_spinner(self.show_progress, message, || f(&self.archiver))
    }
}
