//! # Error Handling
//!
//! This module defines the centralized error type for `cli-shell`. It uses
//! the `thiserror` library to describe every failure the interpreter can
//! report, from malformed input lines to programs that cannot be started.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering parse errors, built-in command
//!   failures, process spawning failures and wrapped library errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Parse errors are reported by the shell and set `$?` without running
//! anything. Command errors are printed as `<command>: <message>` by the
//! executor, which then assigns the exit code given by [`Error::exit_code`].

use thiserror::Error;

/// Main error type for cli-shell operations
#[derive(Error, Debug)]
pub enum Error {
    /// The input line was empty or only whitespace.
    #[error("input cannot be empty")]
    EmptyInput,

    /// A quote was opened but never closed.
    #[error("unclosed quote {quote}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    UnclosedQuote {
        /// The quote character that was left open
        quote: char,
        /// Optional hint for how to fix the line
        hint: Option<String>,
    },

    /// A `NAME=` assignment with nothing after the `=`.
    #[error("variable value cannot be empty: {name}")]
    EmptyAssignment { name: String },

    /// A pipeline contained a stage with no words (`a | | b`, `| a`, `a |`).
    #[error("syntax error near unexpected token `|'")]
    EmptyStage,

    /// A command was built from an empty list of words.
    #[error("empty command")]
    EmptyCommand,

    /// A built-in command was called with invalid arguments.
    #[error("{message}")]
    Usage { command: String, message: String },

    /// A built-in command failed while running.
    #[error("{message}")]
    Builtin { command: String, message: String },

    /// An external program could not be started.
    #[error("{message}")]
    Spawn { program: String, message: String },

    /// An external program was found but could not be executed.
    #[error("{message}")]
    NotExecutable { program: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether this error comes from reading the input line rather than
    /// from running a command.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::UnclosedQuote { .. } | Error::EmptyStage | Error::EmptyCommand
        )
    }

    /// Whether the command's output reader went away.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }

    /// The exit status the shell records for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage { .. } | Error::Regex(_) => 2,
            Error::Spawn { .. } => 127,
            Error::NotExecutable { .. } => 126,
            e if e.is_syntax() => 2,
            _ => 1,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
