//! Add command implementation.

use super::CommandContext;
use crate::cli::AddArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use p7wrap_core::ArchiveConfig;

pub fn execute(args: &AddArgs, ctx: &CommandContext, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = build_config(args);

    let output = add_archive_context(
        ctx.run(format!("Adding to {}", args.archive.display()), |archiver| {
            archiver.add(&config, &args.files)
        }),
        &args.archive,
    )?;

    formatter.format_add_result(&args.archive, &args.files, &output)?;

    Ok(())
}

fn build_config(args: &AddArgs) -> ArchiveConfig {
    let mut config = ArchiveConfig::new(&args.archive)
        .with_recursive(args.recursive)
        .with_delete_after(args.delete_after);

    if let Some(dir) = &args.dir {
        config = config.with_dir(dir);
    }
    if let Some(level) = args.level {
        config = config.with_compression(level);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(pattern) = &args.exclude {
        config = config.with_exclude(pattern);
    }
    if let Some(file) = &args.exclude_file {
        config = config.with_exclude_file(file);
    }
    if let Some(file) = &args.include_file {
        config = config.with_include_file(file);
    }
    if let Some(password) = &args.password {
        config = config.with_password(password);
    }
    if let Some(dir) = &args.working_dir {
        config = config.with_working_dir(dir);
    }

    config
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::cli::Commands;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(argv: &[&str]) -> AddArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Add(args) => args,
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&parse(&["p7wrap", "add", "out.7z", "a.txt"]));

        assert_eq!(config, ArchiveConfig::new("out.7z"));
        assert_eq!(config.compression_level(), 4);
        assert_eq!(config.thread_count(), 1);
    }

    #[test]
    fn test_build_config_all_options() {
        let config = build_config(&parse(&[
            "p7wrap",
            "add",
            "out.7z",
            "a.txt",
            "--dir",
            "/srv",
            "-l",
            "7",
            "--threads",
            "8",
            "--exclude-file",
            "skip.lst",
            "--include-file",
            "take.lst",
            "--password",
            "pw",
            "-r",
            "--working-dir",
            "/tmp",
            "--delete-after",
        ]));

        assert_eq!(config.dir, Some(PathBuf::from("/srv")));
        assert_eq!(config.compression, 7);
        assert_eq!(config.threads, 8);
        assert!(config.exclude.is_none());
        assert_eq!(config.exclude_file, Some(PathBuf::from("skip.lst")));
        assert_eq!(config.include_file, Some(PathBuf::from("take.lst")));
        assert_eq!(config.password.as_deref(), Some("pw"));
        assert!(config.recursive);
        assert_eq!(config.working_dir, Some(PathBuf::from("/tmp")));
        assert!(config.delete_after);
    }
}
