//! # Command Execution
//!
//! Runs a single [`Command`] with a given set of [`Streams`]: built-ins are
//! called directly, anything else is started as an external program.
//!
//! Errors never escape this module. They are printed to the command's
//! `stderr` as `<command>: <message>` and turned into an exit code, so that
//! a failing command behaves the same whether it is a built-in or a program.
//!
//! ## Exit codes
//!
//! - `127`: the program could not be found.
//! - `126`: the program exists but could not be executed.
//! - `128 + N`: the program was killed by signal `N`.
//!
//! A built-in whose output reader went away stops quietly with status 0.

use std::io::{self, Read, Write};
use std::process::{self, ChildStdin, ExitStatus, Stdio};
use std::thread;

use log::{debug, warn};

use crate::builtins::{self, Streams};
use crate::command::Command;
use crate::error::{Error, Result};

/// Exit code for a program that could not be found.
pub const NOT_FOUND: i32 = 127;

/// Exit code for a program that was found but could not be executed.
pub const NOT_EXECUTABLE: i32 = 126;

/// What the shell should do after running a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input; the value is the exit code of the command.
    Continue(i32),
    /// End the session with the given status.
    Exit(i32),
}

impl Flow {
    pub fn code(self) -> i32 {
        match self {
            Flow::Continue(code) | Flow::Exit(code) => code,
        }
    }
}

/// Run one command to completion.
pub fn execute(command: &Command, streams: &mut Streams<'_>) -> Flow {
    if command.is_exit() {
        return match builtins::exit::status(command.args()) {
            Ok(code) => Flow::Exit(code),
            Err(e) => Flow::Continue(report(command.name(), &e, &mut *streams.stderr)),
        };
    }

    let result = match builtins::lookup(command.name()) {
        Some(builtin) => builtin(command.args(), streams),
        None => run_external(command, streams),
    };

    match result {
        Ok(code) => Flow::Continue(code),
        Err(e) if e.is_broken_pipe() => {
            debug!("output of `{}` closed early", command);
            Flow::Continue(0)
        }
        Err(e) => Flow::Continue(report(command.name(), &e, &mut *streams.stderr)),
    }
}

/// Print `error` for `name` and return the exit code it maps to.
pub(crate) fn report(name: &str, error: &Error, stderr: &mut dyn Write) -> i32 {
    if let Err(e) = writeln!(stderr, "{}: {}", name, error) {
        warn!("failed to report error for {}: {}", name, e);
    }
    error.exit_code()
}

fn run_external(command: &Command, streams: &mut Streams<'_>) -> Result<i32> {
    let stdin = if streams.inherit_stdin {
        Stdio::inherit()
    } else {
        Stdio::piped()
    };
    let mut child = process::Command::new(command.name())
        .args(command.args())
        .stdin(stdin)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| spawn_error(command.name(), e))?;
    debug!("spawned `{}` (pid {})", command, child.id());

    let child_stdin = child.stdin.take();
    let child_stdout = child.stdout.take();
    let input: &mut (dyn Read + Send) = &mut *streams.stdin;
    let output: &mut dyn Write = &mut *streams.stdout;

    thread::scope(|scope| -> io::Result<()> {
        let feeder = child_stdin.map(|stdin| scope.spawn(move || feed(input, Some(stdin))));
        if let Some(mut stdout) = child_stdout {
            copy_output(&mut stdout, output)?;
        }
        match feeder.map(|feeder| feeder.join()) {
            Some(Ok(Err(e))) => warn!("failed to write input for `{}`: {}", command, e),
            Some(Err(_)) => warn!("input thread for `{}` panicked", command),
            _ => {}
        }
        Ok(())
    })?;

    let status = child.wait()?;
    debug!("`{}` finished with {}", command, status);
    Ok(exit_code(status))
}

/// Copy all of `input` into a child's stdin, then close it.
///
/// A child that exits without reading all of its input is not an error.
pub(crate) fn feed(input: &mut (dyn Read + Send), stdin: Option<ChildStdin>) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match io::copy(input, &mut stdin) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.map(|_| ()),
    }
}

/// Copy a child's output, stopping quietly if the reader went away.
pub(crate) fn copy_output(source: &mut impl Read, output: &mut dyn Write) -> io::Result<()> {
    let copied = io::copy(source, output).and_then(|_| output.flush());
    match copied {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

pub(crate) fn spawn_error(program: &str, error: io::Error) -> Error {
    match error.kind() {
        io::ErrorKind::NotFound => Error::Spawn {
            program: program.to_string(),
            message: "command not found".to_string(),
        },
        io::ErrorKind::PermissionDenied => Error::NotExecutable {
            program: program.to_string(),
            message: "permission denied".to_string(),
        },
        _ => Error::Spawn {
            program: program.to_string(),
            message: builtins::describe(&error),
        },
    }
}

/// Convert a process status to a shell exit code; a signal `N` maps to
/// `128 + N`.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
