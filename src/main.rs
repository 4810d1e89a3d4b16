//! # cli-shell
//!
//! This is the binary entry point for the `cli-shell` interpreter.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and colored output.
//! - Running the interpreter and turning its final status into the process
//!   exit code.
//!
//! The interpreter itself lives in the `lib.rs` library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli.execute()
}
