//! Output formatter trait for CLI results.

use anyhow::Result;
use p7wrap_core::ArchiveManifest;
use p7wrap_core::VerificationResult;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of adding files to an archive
    fn format_add_result(&self, archive: &Path, files: &[String], output: &str) -> Result<()>;

    /// Format extraction result
    fn format_extract_result(&self, archive: &Path, output_dir: &Path, output: &str)
    -> Result<()>;

    /// Format the result of deleting files from an archive
    fn format_delete_result(&self, archive: &Path, files: &[String], output: &str) -> Result<()>;

    /// Format an archive listing as bare paths
    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()>;

    /// Format an archive listing with entry details
    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool) -> Result<()>;

    /// Format verification result
    fn format_verification_result(&self, archive: &Path, result: &VerificationResult)
    -> Result<()>;

    /// Format error message
    fn format_error(&self, operation: &str, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    /// The operation ran but reported a negative outcome.
    pub fn failure(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Failure,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
