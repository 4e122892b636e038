//! Process wrapper around an external 7-Zip style archiver.
//!
//! `p7wrap-core` builds argument vectors for the `7za` executable, runs it
//! as a child process, and turns its text reports into typed values: a
//! technical listing becomes an [`ArchiveManifest`], a test run a
//! [`VerificationResult`].
//!
//! # Examples
//!
//! ```no_run
//! use p7wrap_core::ArchiveConfig;
//! use p7wrap_core::list;
//! use p7wrap_core::verify;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArchiveConfig::new("backup.7z");
//!
//! if verify(&config)?.is_passed() {
//!     let manifest = list(&config)?;
//!     println!("{} entries, {} bytes", manifest.total_entries(), manifest.total_size());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archiver;
pub mod args;
pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod inspection;
pub mod process;

// Re-export main API types
pub use api::add;
pub use api::delete;
pub use api::extract;
pub use api::list;
pub use api::verify;
pub use archiver::Archiver;
pub use args::build_args;
pub use command::Command;
pub use config::ArchiveConfig;
pub use config::ValidationScope;
pub use error::Error;
pub use error::Result;
pub use process::Invocation;
pub use process::ProcessRunner;
pub use process::SystemRunner;

// Re-export inspection types for easier access
pub use inspection::ArchiveEntry;
pub use inspection::ArchiveFormat;
pub use inspection::ArchiveManifest;
pub use inspection::ListingParser;
pub use inspection::ParseMode;
pub use inspection::Timestamp;
pub use inspection::VerificationResult;
pub use inspection::interpret_test_output;
pub use inspection::parse_listing;
