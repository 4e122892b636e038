//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use p7wrap_core::process::DEFAULT_PROGRAM;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "p7wrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Archiver executable to run
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_PROGRAM)]
    pub binary: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add files to an archive
    Add(AddArgs),
    /// Extract archive contents
    Extract(ExtractArgs),
    /// List archive contents
    List(ListArgs),
    /// Verify archive integrity
    Verify(VerifyArgs),
    /// Delete files from an archive
    Delete(DeleteArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Extract(_) => "extract",
            Self::List(_) => "list",
            Self::Verify(_) => "verify",
            Self::Delete(_) => "delete",
            Self::Completion { .. } => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Archive to create or update
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Files or directories to add
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<String>,

    /// Resolve FILE arguments relative to this directory
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Compression level (0-9, 0 selects the default)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(i32).range(0..=9))]
    pub level: Option<i32>,

    /// Number of CPU threads (1-128)
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=128))]
    pub threads: Option<i32>,

    /// Exclude names matching a wildcard pattern
    #[arg(short = 'x', long, value_name = "PATTERN")]
    pub exclude: Option<String>,

    /// Exclude names listed in a file (ignored when --exclude is given)
    #[arg(long, value_name = "LIST_FILE")]
    pub exclude_file: Option<PathBuf>,

    /// Include names listed in a file
    #[arg(long, value_name = "LIST_FILE")]
    pub include_file: Option<PathBuf>,

    /// Encrypt with a password
    #[arg(long)]
    pub password: Option<String>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Directory for the archiver's temporary files
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Delete source files after they have been added
    #[arg(long)]
    pub delete_after: bool,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Archive password
    #[arg(long)]
    pub password: Option<String>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Directory for the archiver's temporary files
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show detailed file information
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,

    /// Fail on malformed listing output instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Archive password
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Names to delete from the archive
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<String>,

    /// Archive password
    #[arg(long)]
    pub password: Option<String>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}
