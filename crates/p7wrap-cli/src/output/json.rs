//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use p7wrap_core::ArchiveEntry;
use p7wrap_core::ArchiveManifest;
use p7wrap_core::VerificationResult;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct OperationOutput {
    archive: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dir: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<String>,
    output: String,
}

#[derive(Serialize)]
struct ManifestOutput {
    path: String,
    format: String,
    methods: Vec<String>,
    solid: bool,
    blocks: u64,
    physical_size: u64,
    headers_size: u64,
    total_entries: usize,
    total_size: u64,
    total_packed_size: u64,
    entries: Vec<EntryOutput>,
}

#[derive(Serialize)]
struct EntryOutput {
    path: String,
    folder: String,
    directory: bool,
    size: u64,
    packed_size: u64,
    modified: Option<String>,
    created: Option<String>,
    accessed: Option<String>,
    attributes: String,
    crc: Option<String>,
    encrypted: bool,
    methods: Vec<String>,
    block: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    comment: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    host_os: String,
    #[serde(skip_serializing_if = "is_zero")]
    version: u32,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl From<&ArchiveEntry> for EntryOutput {
    fn from(entry: &ArchiveEntry) -> Self {
        Self {
            path: entry.path.clone(),
            folder: entry.folder.clone(),
            directory: entry.is_directory(),
            size: entry.size,
            packed_size: entry.packed_size,
            modified: entry.modified.map(|ts| ts.to_string()),
            created: entry.created.map(|ts| ts.to_string()),
            accessed: entry.accessed.map(|ts| ts.to_string()),
            attributes: entry.attributes.clone(),
            // Directories carry no checksum; the listing prints `CRC = ` for them.
            crc: (!entry.is_directory()).then(|| format!("{:08X}", entry.crc)),
            encrypted: entry.encrypted,
            methods: entry.methods.clone(),
            block: entry.block,
            comment: entry.comment.clone(),
            host_os: entry.host_os.clone(),
            version: entry.version,
        }
    }
}

impl From<&ArchiveManifest> for ManifestOutput {
    fn from(manifest: &ArchiveManifest) -> Self {
        Self {
            path: manifest.path.clone(),
            format: manifest.format.to_string(),
            methods: manifest.methods.clone(),
            solid: manifest.solid,
            blocks: manifest.blocks,
            physical_size: manifest.physical_size,
            headers_size: manifest.headers_size,
            total_entries: manifest.total_entries(),
            total_size: manifest.total_size(),
            total_packed_size: manifest.total_packed_size(),
            entries: manifest.entries.iter().map(EntryOutput::from).collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_add_result(&self, archive: &Path, files: &[String], output: &str) -> Result<()> {
        let data = OperationOutput {
            archive: archive.display().to_string(),
            output_dir: None,
            files: files.to_vec(),
            output: output.to_string(),
        };
        Self::output(&JsonOutput::success("add", data))
    }

    fn format_extract_result(
        &self,
        archive: &Path,
        output_dir: &Path,
        output: &str,
    ) -> Result<()> {
        let data = OperationOutput {
            archive: archive.display().to_string(),
            output_dir: Some(output_dir.display().to_string()),
            files: Vec::new(),
            output: output.to_string(),
        };
        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_delete_result(&self, archive: &Path, files: &[String], output: &str) -> Result<()> {
        let data = OperationOutput {
            archive: archive.display().to_string(),
            output_dir: None,
            files: files.to_vec(),
            output: output.to_string(),
        };
        Self::output(&JsonOutput::success("delete", data))
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        #[derive(Serialize)]
        struct ShortManifest<'a> {
            path: &'a str,
            format: String,
            total_entries: usize,
            entries: Vec<&'a str>,
        }

        let data = ShortManifest {
            path: &manifest.path,
            format: manifest.format.to_string(),
            total_entries: manifest.total_entries(),
            entries: manifest.entries.iter().map(|e| e.path.as_str()).collect(),
        };
        Self::output(&JsonOutput::success("list", data))
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, _human_readable: bool) -> Result<()> {
        Self::output(&JsonOutput::success("list", ManifestOutput::from(manifest)))
    }

    fn format_verification_result(
        &self,
        archive: &Path,
        result: &VerificationResult,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct VerificationOutput<'a> {
            archive: String,
            passed: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            detail: Option<&'a str>,
        }

        let data = VerificationOutput {
            archive: archive.display().to_string(),
            passed: result.is_passed(),
            detail: result.detail(),
        };

        let output = if result.is_passed() {
            JsonOutput::success("verify", data)
        } else {
            JsonOutput::failure("verify", data)
        };
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        // Warnings go to stderr so stdout stays a single JSON document.
        let _ = writeln!(io::stderr(), "WARNING: {message}");
    }
}
