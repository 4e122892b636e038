//! Argument vector construction for the archiver.

use std::path::Path;

use crate::ArchiveConfig;
use crate::Command;

/// Assume "yes" for every prompt.
const FLAG_YES: &str = "-y";
/// Disable the percentage progress indicator.
const FLAG_NO_PROGRESS: &str = "-bd";
/// Technical listing: one `key = value` block per entry.
const FLAG_TECHNICAL_LISTING: &str = "-slt";
/// Delete files after they have been compressed.
const FLAG_DELETE_AFTER: &str = "-sdel";
const FLAG_RECURSIVE: &str = "-r";

/// Builds the arguments that follow the command letter.
///
/// The result always starts with the archive path, an empty placeholder
/// token, `-y` and `-bd`, followed by command-specific switches and the
/// password, recursion and working-directory switches. File names are not
/// included; they are appended by the process invoker.
///
/// # Examples
///
/// ```
/// use p7wrap_core::ArchiveConfig;
/// use p7wrap_core::Command;
/// use p7wrap_core::build_args;
///
/// let config = ArchiveConfig::new("data.7z").with_compression(9);
/// let args = build_args(&config, Command::Add);
/// assert_eq!(args, ["data.7z", "", "-y", "-bd", "-mx=9", "-mmt=1"]);
///
/// let args = build_args(&config, Command::List);
/// assert_eq!(args, ["data.7z", "", "-y", "-bd", "-slt"]);
/// ```
#[must_use]
pub fn build_args(config: &ArchiveConfig, command: Command) -> Vec<String> {
    let mut args = vec![
        path_arg(&config.archive),
        String::new(),
        FLAG_YES.to_string(),
        FLAG_NO_PROGRESS.to_string(),
    ];

    match command {
        Command::Add => {
            args.push(format!("-mx={}", config.compression_level()));
            args.push(format!("-mmt={}", config.thread_count()));

            if let Some(pattern) = &config.exclude {
                args.push(format!("-x{pattern}"));
            } else if let Some(file) = &config.exclude_file {
                args.push(format!("-xr@{}", path_arg(file)));
            }

            if let Some(file) = &config.include_file {
                args.push(format!("-ir@{}", path_arg(file)));
            }

            if config.delete_after {
                args.push(FLAG_DELETE_AFTER.to_string());
            }
        }
        Command::Extract => {
            if let Some(dir) = &config.output_dir {
                args.push(format!("-o{}", path_arg(dir)));
            }
        }
        Command::List => args.push(FLAG_TECHNICAL_LISTING.to_string()),
        Command::Benchmark | Command::Delete | Command::Test | Command::Update => {}
    }

    if let Some(password) = &config.password {
        args.push(format!("-p{password}"));
    }

    if config.recursive {
        args.push(FLAG_RECURSIVE.to_string());
    }

    if let Some(dir) = &config.working_dir {
        args.push(format!("-w{}", path_arg(dir)));
    }

    args
}

/// Returns a copy of `args` safe to log: password switches are masked.
#[must_use]
pub fn redact(args: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            if arg.len() > 2 && arg.starts_with("-p") {
                "-p***".to_string()
            } else {
                arg.clone()
            }
        })
        .collect()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn prefix() -> Vec<String> {
        vec![
            "data.7z".to_string(),
            String::new(),
            "-y".to_string(),
            "-bd".to_string(),
        ]
    }

    #[test]
    fn test_common_prefix_for_every_command() {
        let config = ArchiveConfig::new("data.7z");
        for command in [
            Command::Add,
            Command::Delete,
            Command::Extract,
            Command::List,
            Command::Test,
        ] {
            let args = build_args(&config, command);
            assert_eq!(args[..4], prefix()[..], "prefix for {command}");
        }
    }

    #[test]
    fn test_add_defaults() {
        let args = build_args(&ArchiveConfig::new("data.7z"), Command::Add);
        let mut expected = prefix();
        expected.extend(["-mx=4".to_string(), "-mmt=1".to_string()]);
        assert_eq!(args, expected);
    }

    #[test]
    fn test_add_zero_compression_uses_default() {
        let config = ArchiveConfig::new("data.7z").with_compression(0);
        let args = build_args(&config, Command::Add);
        assert!(args.contains(&"-mx=4".to_string()));
    }

    #[test]
    fn test_add_compression_clamped() {
        let config = ArchiveConfig::new("data.7z").with_compression(12);
        assert!(build_args(&config, Command::Add).contains(&"-mx=9".to_string()));

        let config = ArchiveConfig::new("data.7z").with_compression(-4);
        assert!(build_args(&config, Command::Add).contains(&"-mx=0".to_string()));
    }

    #[test]
    fn test_add_threads() {
        let config = ArchiveConfig::new("data.7z").with_threads(0);
        assert!(build_args(&config, Command::Add).contains(&"-mmt=1".to_string()));

        let config = ArchiveConfig::new("data.7z").with_threads(16);
        assert!(build_args(&config, Command::Add).contains(&"-mmt=16".to_string()));

        let config = ArchiveConfig::new("data.7z").with_threads(1000);
        assert!(build_args(&config, Command::Add).contains(&"-mmt=128".to_string()));
    }

    #[test]
    fn test_exclude_pattern_wins_over_exclude_file() {
        let config = ArchiveConfig::new("data.7z")
            .with_exclude("!*.tmp")
            .with_exclude_file("exclude.lst");
        let args = build_args(&config, Command::Add);

        assert!(args.contains(&"-x!*.tmp".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-xr@")));
    }

    #[test]
    fn test_exclude_file_and_include_file() {
        let config = ArchiveConfig::new("data.7z")
            .with_exclude_file("exclude.lst")
            .with_include_file("include.lst");
        let args = build_args(&config, Command::Add);

        let exclude = args.iter().position(|a| a == "-xr@exclude.lst").unwrap_or(usize::MAX);
        let include = args.iter().position(|a| a == "-ir@include.lst").unwrap_or(usize::MAX);
        assert!(exclude < include);
        assert!(include < args.len());
    }

    #[test]
    fn test_add_delete_after() {
        let config = ArchiveConfig::new("data.7z").with_delete_after(true);
        assert!(build_args(&config, Command::Add).contains(&"-sdel".to_string()));

        // Only meaningful when adding
        assert!(!build_args(&config, Command::Delete).contains(&"-sdel".to_string()));
    }

    #[test]
    fn test_add_only_switches_absent_for_other_commands() {
        let config = ArchiveConfig::new("data.7z")
            .with_exclude("!*.tmp")
            .with_include_file("include.lst")
            .with_threads(4);
        for command in [Command::Extract, Command::List, Command::Test, Command::Delete] {
            let args = build_args(&config, command);
            assert!(
                !args.iter().any(|a| a.starts_with("-mx") || a.starts_with("-mmt")),
                "{command} must not carry compression switches"
            );
            assert!(!args.iter().any(|a| a.starts_with("-x") || a.starts_with("-ir@")));
        }
    }

    #[test]
    fn test_extract_output_dir() {
        let config = ArchiveConfig::new("data.7z").with_output_dir(PathBuf::from("/tmp/out"));
        let mut expected = prefix();
        expected.push("-o/tmp/out".to_string());
        assert_eq!(build_args(&config, Command::Extract), expected);

        let config = ArchiveConfig::new("data.7z");
        assert_eq!(build_args(&config, Command::Extract), prefix());
    }

    #[test]
    fn test_list_requests_technical_listing() {
        let args = build_args(&ArchiveConfig::new("data.7z"), Command::List);
        assert_eq!(args.last().map(String::as_str), Some("-slt"));
    }

    #[test]
    fn test_common_suffix_order() {
        let config = ArchiveConfig::new("data.7z")
            .with_password("secret")
            .with_recursive(true)
            .with_working_dir("/tmp/work");
        let args = build_args(&config, Command::Test);

        let mut expected = prefix();
        expected.extend([
            "-psecret".to_string(),
            "-r".to_string(),
            "-w/tmp/work".to_string(),
        ]);
        assert_eq!(args, expected);
    }

    #[test]
    fn test_list_suffix_follows_listing_flag() {
        let config = ArchiveConfig::new("data.7z").with_password("pw");
        let args = build_args(&config, Command::List);
        assert_eq!(args[4..], ["-slt".to_string(), "-ppw".to_string()]);
    }

    #[test]
    fn test_redact_masks_password() {
        let config = ArchiveConfig::new("data.7z").with_password("secret");
        let redacted = redact(&build_args(&config, Command::Test));
        assert!(redacted.contains(&"-p***".to_string()));
        assert!(!redacted.iter().any(|a| a.contains("secret")));
        assert!(redacted.contains(&"data.7z".to_string()));
    }
}
