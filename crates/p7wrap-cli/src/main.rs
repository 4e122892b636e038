//! p7wrap CLI - Command-line utility for driving the 7-Zip archiver.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use commands::CommandContext;
use progress::CliSpinner;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(code) => code,
        Err(err) => {
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli, formatter: &dyn output::OutputFormatter) -> Result<ExitCode> {
    let show_progress = !cli.quiet && !cli.json && CliSpinner::should_show();
    let ctx = CommandContext::new(&cli.binary, show_progress);

    match &cli.command {
        cli::Commands::Add(args) => commands::add::execute(args, &ctx, formatter)?,
        cli::Commands::Extract(args) => commands::extract::execute(args, &ctx, formatter)?,
        cli::Commands::List(args) => commands::list::execute(args, &ctx, formatter)?,
        cli::Commands::Verify(args) => return commands::verify::execute(args, &ctx, formatter),
        cli::Commands::Delete(args) => commands::delete::execute(args, &ctx, formatter)?,
        cli::Commands::Completion { shell } => commands::completion::execute(*shell),
    }

    Ok(ExitCode::SUCCESS)
}

/// Installs the log subscriber; `RUST_LOG` refines the level chosen by flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
