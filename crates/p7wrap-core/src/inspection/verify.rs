//! Interpretation of the archiver's test (`t`) report.

use std::fmt;

use crate::Error;
use crate::Result;

/// Line printed when every entry tested cleanly.
pub const SUCCESS_SENTINEL: &str = "Everything is Ok";

/// Line printed before the first error detail.
pub const ERROR_SENTINEL: &str = "ERRORS:";

/// Outcome of an archive test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// The archive tested cleanly.
    Passed,
    /// The archiver reported errors.
    Failed {
        /// First line following the error sentinel.
        detail: String,
    },
}

impl VerificationResult {
    /// Returns `true` if the archive tested cleanly.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the error detail of a failed test.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed { detail } => Some(detail),
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Failed { detail } => write!(f, "failed: {detail}"),
        }
    }
}

/// Scans test output for the success or error sentinel.
///
/// Lines are compared exactly, top to bottom; whichever sentinel appears
/// first decides the result.
///
/// # Errors
///
/// Returns [`Error::Parse`] if neither sentinel is present, or if the error
/// sentinel is the last line and no detail follows it.
///
/// # Examples
///
/// ```
/// use p7wrap_core::VerificationResult;
/// use p7wrap_core::interpret_test_output;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ok = interpret_test_output("Testing archive: a.7z\n\nEverything is Ok\n")?;
/// assert!(ok.is_passed());
///
/// let failed = interpret_test_output("ERRORS:\nData error in file X\n")?;
/// assert_eq!(failed.detail(), Some("Data error in file X"));
/// # Ok(())
/// # }
/// ```
pub fn interpret_test_output(text: &str) -> Result<VerificationResult> {
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    while let Some(line) = lines.next() {
        if line == SUCCESS_SENTINEL {
            return Ok(VerificationResult::Passed);
        }
        if line == ERROR_SENTINEL {
            return lines
                .next()
                .map(|detail| VerificationResult::Failed {
                    detail: detail.to_string(),
                })
                .ok_or_else(|| {
                    Error::Parse(format!("{ERROR_SENTINEL:?} is not followed by an error detail"))
                });
        }
    }

    Err(Error::Parse("cannot determine verification result".into()))
}
