//! Spinner shown while the archiver runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// CLI spinner wrapper.
///
/// The archiver reports no incremental progress (it runs with `-bd`), so
/// this only shows that work is happening and for how long. Automatically
/// cleans up on drop.
pub struct CliSpinner {
    bar: ProgressBar,
}

impl CliSpinner {
    /// Creates and starts a spinner with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();

        // Template: "⠋ Adding to backup.7z (3s)"
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.into());
        bar.enable_steady_tick(TICK_INTERVAL);

        Self { bar }
    }

    /// Checks if we should show a spinner (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Runs `f`, showing a spinner with `message` while it runs if `show` is set.
pub fn with_spinner<T>(show: bool, message: impl Into<String>, f: impl FnOnce() -> T) -> T {
    let _spinner = show.then(|| CliSpinner::new(message));
    f()
}
