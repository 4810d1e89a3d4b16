//! # Run Command Implementation
//!
//! Runs the interpreter, reading command lines from one of three places:
//!
//! 1. `-c LINE`: a single line, after which the process exits. The line's
//!    first command gets the process's standard input.
//! 2. `SCRIPT`: a file of command lines, one per line.
//! 3. Standard input, line by line. The prompt is only shown when standard
//!    input is a terminal.
//!
//! The process exits with the status passed to `exit`, or otherwise with the
//! status of the last command, truncated to eight bits.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;

use cli_shell::builtins::Streams;
use cli_shell::output::OutputConfig;
use cli_shell::{Environment, Shell};

/// Run command lines
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run a single command line and exit with its status
    #[arg(short = 'c', long = "command", value_name = "LINE", conflicts_with = "script")]
    pub command: Option<String>,

    /// File of command lines to run instead of reading standard input
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Prompt shown before each line in interactive sessions
    #[arg(
        long,
        value_name = "TEXT",
        env = "CLI_SHELL_PROMPT",
        default_value = "> "
    )]
    pub prompt: String,
}

/// Execute the interpreter with the given arguments.
pub fn execute(args: RunArgs, color: &str) -> Result<ExitCode> {
    let output = OutputConfig::from_env_and_flag(color);
    let mut shell = Shell::new(Environment::from_process()).with_output(output);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let status = if let Some(line) = &args.command {
        debug!("running command line from -c");
        let mut stdin = io::stdin();
        let flow = shell.run_line(
            line,
            &mut Streams {
                stdin: &mut stdin,
                stdout: &mut out,
                stderr: &mut err,
                inherit_stdin: true,
            },
        );
        out.flush()?;
        flow.code()
    } else if let Some(path) = &args.script {
        debug!("running script {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open script: {}", path.display()))?;
        shell
            .run(BufReader::new(file), &mut out, &mut err, None)
            .with_context(|| format!("Failed to run script: {}", path.display()))?
    } else {
        let stdin = io::stdin();
        let prompt = stdin.is_terminal().then_some(args.prompt.as_str());
        shell.run(stdin.lock(), &mut out, &mut err, prompt)?
    };

    Ok(exit_code(status))
}

fn exit_code(status: i32) -> ExitCode {
    ExitCode::from((status & 0xff) as u8)
}
