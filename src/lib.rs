//! # cli-shell
//!
//! A small Unix-style command interpreter. It is used by the `cli-shell`
//! binary but the pieces can also be driven directly, for example to run a
//! script against captured output in tests.
//!
//! ## Quick Example
//!
//! ```
//! use cli_shell::parser::{parse, Parsed};
//! use cli_shell::Environment;
//!
//! let mut env = Environment::new();
//! env.set("file", "notes.txt");
//!
//! let Parsed::Pipeline(commands) = parse("cat $file | grep -i todo", &env).unwrap() else {
//!     panic!("expected a pipeline");
//! };
//! assert_eq!(commands.len(), 2);
//! assert_eq!(commands[0].args(), ["notes.txt"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Variables (`environment`)**: the values `$NAME` expands to, plus `$?`,
//!   the exit status of the last command.
//! - **Parsing (`parser`)**: splits a line into words while honouring single
//!   and double quotes, expands variables and groups the words into the
//!   stages of a pipeline.
//! - **Built-ins (`builtins`)**: `cat`, `echo`, `wc`, `pwd`, `grep` and
//!   `exit`, implemented in-process.
//! - **Execution (`executor`, `pipeline`)**: runs a single command, or a chain
//!   of commands with each stage's output feeding the next stage's input.
//! - **Sessions (`shell`)**: the read-eval loop that ties everything together.
//!
//! ## Execution Flow
//!
//! For each input line [`Shell`] will:
//!
//! 1.  **Tokenize** the line, keeping quotes attached to their words.
//! 2.  **Expand** `$NAME` and `$?` outside single quotes, then split the
//!     result again so that variables may hold several words or a `|`.
//! 3.  **Assign** when the line is a single `NAME=VALUE` word, or
//! 4.  **Run** the resulting pipeline and store its exit code in `$?`.

pub mod builtins;
pub mod command;
pub mod environment;
pub mod error;
pub mod executor;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod shell;

#[cfg(test)]
mod parser_proptest;

pub use command::Command;
pub use environment::Environment;
pub use executor::Flow;
pub use shell::Shell;
