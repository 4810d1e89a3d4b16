//! CLI argument parsing and command dispatch

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// cli-shell - A small Unix-style command interpreter
#[derive(Parser, Debug)]
#[command(name = "cli-shell")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute; without one the interpreter runs
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: commands::run::RunArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        env = "CLI_SHELL_LOG",
        default_value = "warn",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.log_level);

        match self.command {
            Some(Commands::Completions(args)) => {
                commands::completions::execute(args)?;
                Ok(ExitCode::SUCCESS)
            }
            None => commands::run::execute(self.run, &self.color),
        }
    }
}

fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(filter)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}
