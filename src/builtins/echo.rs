//! `echo ARGS...`

use std::io::Write;

use super::Streams;
use crate::error::Result;

/// Print the arguments separated by single spaces, followed by a newline.
pub fn run(args: &[String], streams: &mut Streams<'_>) -> Result<i32> {
    writeln!(streams.stdout, "{}", args.join(" "))?;
    streams.stdout.flush()?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::testing;

    #[test]
    fn test_echo_joins_arguments() {
        let out = testing::run(run, &["Hello", "World"]).unwrap();
        assert_eq!(out.code, 0);
        assert_eq!(out.stdout, "Hello World\n");
    }

    #[test]
    fn test_echo_keeps_embedded_newline() {
        let out = testing::run(run, &["Hello from echo!!!\n"]).unwrap();
        assert_eq!(out.stdout, "Hello from echo!!!\n\n");
    }

    #[test]
    fn test_echo_without_arguments() {
        let out = testing::run(run, &[]).unwrap();
        assert_eq!(out.stdout, "\n");
    }

    #[test]
    fn test_echo_ignores_stdin() {
        let out = testing::run_with_input(run, &["a"], "ignored").unwrap();
        assert_eq!(out.stdout, "a\n");
    }
}
