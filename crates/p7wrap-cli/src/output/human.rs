//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use p7wrap_core::ArchiveEntry;
use p7wrap_core::ArchiveFormat;
use p7wrap_core::ArchiveManifest;
use p7wrap_core::VerificationResult;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn format_entry_line(entry: &ArchiveEntry, human_readable: bool) -> String {
        let size_str = if human_readable {
            Self::format_size(entry.size)
        } else {
            entry.size.to_string()
        };

        let type_char = if entry.is_directory() { "d" } else { "-" };
        let lock_char = if entry.encrypted { "*" } else { " " };
        let modified = entry
            .modified
            .map_or_else(|| " ".repeat(19), |ts| ts.to_string());

        format!(
            "{type_char}{lock_char} {modified}  {size_str:>10}  {}",
            entry.path
        )
    }

    fn describe_archive(manifest: &ArchiveManifest) -> String {
        let mut parts = vec![manifest.format.to_string()];
        if !manifest.methods.is_empty() {
            parts.push(manifest.methods.join(" "));
        }
        if manifest.format == ArchiveFormat::SevenZ {
            if manifest.solid {
                parts.push(format!("solid, {} blocks", manifest.blocks));
            }
            if manifest.physical_size > 0 {
                parts.push(Self::format_size(manifest.physical_size));
            }
        }
        format!("{} ({})", manifest.path, parts.join(", "))
    }

    fn write_success(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn write_raw_output(&self, output: &str) {
        if !self.verbose {
            return;
        }
        for line in output.lines().filter(|l| !l.trim().is_empty()) {
            let _ = self.term.write_line(&format!("  {line}"));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_add_result(&self, archive: &Path, files: &[String], output: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_success(&format!(
            "Added {} {} to {}",
            Self::format_number(files.len()),
            if files.len() == 1 { "item" } else { "items" },
            archive.display()
        ));
        self.write_raw_output(output);

        Ok(())
    }

    fn format_extract_result(
        &self,
        archive: &Path,
        output_dir: &Path,
        output: &str,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_success("Extraction complete");
        let _ = self
            .term
            .write_line(&format!("  Archive: {}", archive.display()));
        let _ = self
            .term
            .write_line(&format!("  Output:  {}", output_dir.display()));
        self.write_raw_output(output);

        Ok(())
    }

    fn format_delete_result(&self, archive: &Path, files: &[String], output: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_success(&format!(
            "Deleted {} from {}",
            files.join(", "),
            archive.display()
        ));
        self.write_raw_output(output);

        Ok(())
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            let _ = self.term.write_line(&entry.path);
        }

        Ok(())
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("Archive: {}", Self::describe_archive(manifest)));
            let _ = self.term.write_line("");
        }

        for entry in &manifest.entries {
            let _ = self
                .term
                .write_line(&Self::format_entry_line(entry, human_readable));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} entries, {} ({} packed)",
            Self::format_number(manifest.total_entries()),
            Self::format_size(manifest.total_size()),
            Self::format_size(manifest.total_packed_size())
        ));

        Ok(())
    }

    fn format_verification_result(
        &self,
        archive: &Path,
        result: &VerificationResult,
    ) -> Result<()> {
        if self.quiet && result.is_passed() {
            return Ok(());
        }

        let status_str = match (result, self.use_colors) {
            (VerificationResult::Passed, true) => style("PASSED").green().bold().to_string(),
            (VerificationResult::Failed { .. }, true) => style("FAILED").red().bold().to_string(),
            (VerificationResult::Passed, false) => "PASSED".to_string(),
            (VerificationResult::Failed { .. }, false) => "FAILED".to_string(),
        };
        let _ = self.term.write_line(&format!(
            "Archive verification: {status_str} ({})",
            archive.display()
        ));

        if let Some(detail) = result.detail() {
            let _ = self.term.write_line(&format!("  {detail}"));
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
