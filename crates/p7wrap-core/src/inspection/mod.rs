//! Structured views of archiver output.
//!
//! This module turns the archiver's text reports into typed values: the
//! technical listing becomes an [`ArchiveManifest`], the test report a
//! [`VerificationResult`].
//!
//! # Examples
//!
//! ```
//! use p7wrap_core::inspection::interpret_test_output;
//! use p7wrap_core::inspection::parse_listing;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = parse_listing("--\nPath = a.7z\nType = 7z\n\n----------\nPath = a.txt\n\n");
//! println!("Archive contains {} entries", manifest.total_entries());
//!
//! let result = interpret_test_output("Everything is Ok\n")?;
//! assert!(result.is_passed());
//! # Ok(())
//! # }
//! ```

pub mod manifest;
pub mod parser;
pub mod timestamp;
pub mod verify;

pub use manifest::ArchiveEntry;
pub use manifest::ArchiveFormat;
pub use manifest::ArchiveManifest;
pub use parser::ListingParser;
pub use parser::ParseMode;
pub use parser::parse_listing;
pub use timestamp::Timestamp;
pub use verify::VerificationResult;
pub use verify::interpret_test_output;
