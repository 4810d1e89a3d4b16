//! # The Interpreter Loop
//!
//! [`Shell`] ties the pieces together: it parses each line against its
//! [`Environment`], applies assignments, runs pipelines and records every
//! exit status in `$?`.
//!
//! ```rust
//! use cli_shell::{Environment, Shell};
//!
//! let mut shell = Shell::new(Environment::new());
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let script = "name=world\necho \"hello $name\"\n";
//! let status = shell.run(script.as_bytes(), &mut out, &mut err, None).unwrap();
//! assert_eq!(status, 0);
//! assert_eq!(String::from_utf8(out).unwrap(), "hello world\n");
//! ```

use std::io::{self, BufRead, Write};

use log::{debug, info, warn};

use crate::builtins::Streams;
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::executor::Flow;
use crate::output::OutputConfig;
use crate::parser::{self, Parsed};
use crate::pipeline;

/// Prefix for errors reported by the shell itself.
pub const SHELL_NAME: &str = "cli-shell";

/// A command interpreter session.
#[derive(Debug, Clone)]
pub struct Shell {
    env: Environment,
    output: OutputConfig,
}

impl Shell {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            output: OutputConfig::plain(),
        }
    }

    /// Use `output` to decide how the prompt and errors are rendered.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Run one input line.
    ///
    /// A blank line does nothing and leaves `$?` as it was. Anything else
    /// updates `$?`, including lines that fail to parse.
    pub fn run_line(&mut self, line: &str, streams: &mut Streams<'_>) -> Flow {
        let flow = match parser::parse(line, &self.env) {
            Err(Error::EmptyInput) => return Flow::Continue(self.env.status()),
            Err(e) => Flow::Continue(self.report(&e, &mut *streams.stderr)),
            Ok(Parsed::Assignment { name, value }) => {
                self.env.set(name, value);
                Flow::Continue(0)
            }
            Ok(Parsed::Pipeline(commands)) => pipeline::run(&commands, streams),
        };
        self.env.set_status(flow.code());
        flow
    }

    /// Read and run lines from `input` until it ends or `exit` is called.
    ///
    /// When `prompt` is given it is written to `stderr` before each line.
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`. Commands
    /// get an empty standard input. Returns the status passed to
    /// `exit`, or the last recorded `$?` at end of input.
    pub fn run<R: BufRead>(
        &mut self,
        mut input: R,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        prompt: Option<&str>,
    ) -> Result<i32> {
        let mut raw = Vec::new();
        loop {
            if let Some(prompt) = prompt {
                write!(stderr, "{}", self.output.paint_prompt(prompt))?;
                stderr.flush()?;
            }

            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                debug!("end of input");
                if prompt.is_some() {
                    writeln!(stderr)?;
                }
                return Ok(self.env.status());
            }

            let line = String::from_utf8_lossy(&raw);
            let mut stdin = io::empty();
            let flow = self.run_line(
                &line,
                &mut Streams {
                    stdin: &mut stdin,
                    stdout: &mut *stdout,
                    stderr: &mut *stderr,
                    inherit_stdin: false,
                },
            );
            stdout.flush()?;

            if let Flow::Exit(code) = flow {
                info!("exit requested with status {}", code);
                return Ok(code);
            }
        }
    }

    fn report(&self, error: &Error, stderr: &mut dyn Write) -> i32 {
        let message = format!("{}: {}", SHELL_NAME, error);
        if let Err(e) = writeln!(stderr, "{}", self.output.paint_error(&message)) {
            warn!("failed to report error: {}", e);
        }
        error.exit_code()
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Environment::new())
    }
}
