//! # Built-in Commands
//!
//! Commands implemented inside the shell process. Each built-in lives in its
//! own file and exposes a `run` function with the [`Builtin`] signature: it
//! receives its arguments and the [`Streams`] it may use, and returns an exit
//! code.
//!
//! Problems that only affect one operand (a missing file for `cat`, say) are
//! printed to `stderr` by the built-in itself, which then carries on and
//! returns a non-zero code. Anything that stops the command is returned as an
//! [`Error`](crate::error::Error) and reported by the executor.
//!
//! `exit` is recognised here but handled by the executor, because it ends
//! the session instead of producing an exit code.

pub mod cat;
pub mod echo;
pub mod exit;
pub mod grep;
pub mod pwd;
pub mod wc;

use std::io::{self, Read, Write};

use crate::error::Result;

pub const CAT: &str = "cat";
pub const ECHO: &str = "echo";
pub const EXIT: &str = "exit";
pub const GREP: &str = "grep";
pub const PWD: &str = "pwd";
pub const WC: &str = "wc";

/// The standard streams handed to a command.
pub struct Streams<'a> {
    pub stdin: &'a mut (dyn Read + Send),
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
    /// `stdin` is the process's own standard input. External programs then
    /// inherit it directly instead of being fed from `stdin`; built-ins
    /// still read `stdin`.
    pub inherit_stdin: bool,
}

/// Signature shared by every built-in.
pub type Builtin = fn(&[String], &mut Streams<'_>) -> Result<i32>;

pub fn is_builtin(name: &str) -> bool {
    name == EXIT || lookup(name).is_some()
}

/// Find the implementation of a built-in that produces an exit code.
pub fn lookup(name: &str) -> Option<Builtin> {
    let builtin: Builtin = match name {
        CAT => cat::run,
        ECHO => echo::run,
        GREP => grep::run,
        PWD => pwd::run,
        WC => wc::run,
        _ => return None,
    };
    Some(builtin)
}

/// Describe an I/O error the way coreutils do, without the `(os error N)`
/// suffix.
pub(crate) fn describe(error: &io::Error) -> String {
    let message = error.to_string();
    match message.find(" (os error") {
        Some(end) => message[..end].to_string(),
        None => message,
    }
}
