//! # CLI Command Implementations
//!
//! Each mode of the `cli-shell` binary lives in its own file:
//!
//! - `run`: the interpreter itself (a single `-c` line, a script file, or
//!   standard input).
//! - `completions`: shell completion scripts for the binary's own options.
//!
//! Each module defines an `Args` struct derived with `clap` and an `execute`
//! function that calls into the `cli_shell` library.

pub mod completions;
pub mod run;
