//! # Pipelines
//!
//! Runs commands connected by `|`, feeding the output of each stage to the
//! input of the next one.
//!
//! ## Wiring
//!
//! - Two external programs next to each other are connected with an OS pipe
//!   and run concurrently.
//! - A built-in runs on the calling thread. It reads whatever the previous
//!   stage produced and, unless it is the last stage, its output is buffered
//!   and handed to the next stage.
//! - Buffered output going into an external program is written by a helper
//!   thread, so a program that produces output before it has read all of its
//!   input cannot stall the pipeline.
//!
//! The first stage reads the caller's input and the last stage writes to the
//! caller's output. When the caller's input is the process's own standard
//! input, an external first stage inherits it instead of being fed. `exit` inside a multi-stage pipeline does not end the
//! session: it produces no output and succeeds. The exit code of a pipeline
//! is the exit code of its last stage.

use std::io::{self, Cursor, Read, Write};
use std::process::{self, Child, ChildStdout, Stdio};
use std::thread;

use log::{debug, warn};

use crate::builtins::Streams;
use crate::command::Command;
use crate::executor::{self, Flow};

/// Where the next stage reads its input from.
enum Source<'a> {
    /// The input handed to the pipeline.
    Input(&'a mut (dyn Read + Send)),
    /// The process's standard input, handed to the pipeline.
    Inherit(&'a mut (dyn Read + Send)),
    /// The stdout of a running program.
    Child(ChildStdout),
    /// Output buffered from a built-in.
    Buffer(Vec<u8>),
    /// Nothing to read.
    Empty,
}

impl<'a> Source<'a> {
    fn into_reader(self) -> Box<dyn Read + Send + 'a> {
        match self {
            Source::Input(input) | Source::Inherit(input) => Box::new(input),
            Source::Child(stdout) => Box::new(stdout),
            Source::Buffer(bytes) => Box::new(Cursor::new(bytes)),
            Source::Empty => Box::new(io::empty()),
        }
    }
}

/// Run a pipeline and return what the shell should do next.
pub fn run(commands: &[Command], streams: &mut Streams<'_>) -> Flow {
    match commands {
        [] => Flow::Continue(0),
        [command] => executor::execute(command, streams),
        _ => Flow::Continue(run_stages(commands, streams)),
    }
}

fn run_stages(commands: &[Command], streams: &mut Streams<'_>) -> i32 {
    let input: &mut (dyn Read + Send) = &mut *streams.stdin;
    let output: &mut dyn Write = &mut *streams.stdout;
    let errors: &mut dyn Write = &mut *streams.stderr;
    let inherit_stdin = streams.inherit_stdin;
    let last = commands.len() - 1;

    thread::scope(|scope| {
        let mut source = if inherit_stdin {
            Source::Inherit(input)
        } else {
            Source::Input(input)
        };
        let mut codes = vec![0; commands.len()];
        let mut children: Vec<(usize, Child)> = Vec::new();
        let mut feeders = Vec::new();

        for (index, command) in commands.iter().enumerate() {
            let is_last = index == last;

            if command.is_exit() {
                debug!("skipping `{}` inside a pipeline", command);
                source = Source::Empty;
                continue;
            }

            if command.is_builtin() {
                let mut reader = source.into_reader();
                let mut buffer = Vec::new();
                let flow = {
                    let stdout: &mut dyn Write = if is_last { &mut *output } else { &mut buffer };
                    let mut stage = Streams {
                        stdin: &mut *reader,
                        stdout,
                        stderr: &mut *errors,
                        inherit_stdin: false,
                    };
                    executor::execute(command, &mut stage)
                };
                codes[index] = flow.code();
                source = if is_last {
                    Source::Empty
                } else {
                    Source::Buffer(buffer)
                };
                continue;
            }

            let mut program = process::Command::new(command.name());
            program
                .args(command.args())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit());
            let pending = match source {
                Source::Child(stdout) => {
                    program.stdin(Stdio::from(stdout));
                    None
                }
                Source::Inherit(_) => {
                    program.stdin(Stdio::inherit());
                    None
                }
                Source::Empty => {
                    program.stdin(Stdio::null());
                    None
                }
                other => {
                    program.stdin(Stdio::piped());
                    Some(other.into_reader())
                }
            };

            let mut child = match program.spawn() {
                Ok(child) => child,
                Err(e) => {
                    let error = executor::spawn_error(command.name(), e);
                    codes[index] = executor::report(command.name(), &error, &mut *errors);
                    source = Source::Empty;
                    continue;
                }
            };
            debug!("spawned `{}` (pid {})", command, child.id());

            if let Some(mut reader) = pending {
                let stdin = child.stdin.take();
                feeders.push(scope.spawn(move || executor::feed(&mut *reader, stdin)));
            }

            source = match child.stdout.take() {
                Some(mut stdout) if is_last => {
                    if let Err(e) = executor::copy_output(&mut stdout, &mut *output) {
                        warn!("failed to copy output of `{}`: {}", command, e);
                    }
                    Source::Empty
                }
                Some(stdout) => Source::Child(stdout),
                None => Source::Empty,
            };
            children.push((index, child));
        }

        for feeder in feeders {
            match feeder.join() {
                Ok(Err(e)) => warn!("failed to write pipeline input: {}", e),
                Err(_) => warn!("pipeline input thread panicked"),
                Ok(Ok(())) => {}
            }
        }

        for (index, mut child) in children {
            codes[index] = match child.wait() {
                Ok(status) => executor::exit_code(status),
                Err(e) => {
                    warn!("failed to wait for `{}`: {}", commands[index], e);
                    1
                }
            };
        }

        debug!("pipeline exit codes: {:?}", codes);
        codes[last]
    })
}
