//! # `grep [-i] [-w] [-A NUM] PATTERN [FILE...]`
//!
//! Prints the lines that match a regular expression. Options may appear
//! before or after the operands; argument parsing is done with `clap`, so
//! `grep --help` prints a usage summary.
//!
//! ## Trailing context
//!
//! With `-A NUM`, the `NUM` lines following a match are printed as well. A
//! match found inside the context restarts the count. Whenever a context
//! runs to completion without being restarted, a `------` separator line is
//! printed; a context cut short by the end of the input has no separator.
//!
//! ## Exit codes
//!
//! `0` once the input has been searched, whether or not a line matched;
//! `2` for usage errors, invalid patterns and unreadable files.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use clap::error::ErrorKind;
use clap::Parser;
use regex::{Regex, RegexBuilder};

use super::{describe, Streams, GREP};
use crate::error::Result;

/// Line printed after a trailing context that ran to completion.
pub const CONTEXT_SEPARATOR: &str = "------";

/// Print lines that match a pattern
#[derive(Parser, Debug)]
#[command(name = "grep", disable_version_flag = true)]
pub struct GrepArgs {
    /// Ignore case distinctions in the pattern and the input
    #[arg(short = 'i', long = "ignore-case")]
    pub ignore_case: bool,

    /// Only match the pattern as a whole word
    #[arg(short = 'w', long = "word-regexp")]
    pub word_regexp: bool,

    /// Print NUM lines of trailing context after each matching line
    #[arg(
        short = 'A',
        long = "after-context",
        value_name = "NUM",
        default_value_t = 0
    )]
    pub after_context: usize,

    /// Regular expression to search for
    pub pattern: String,

    /// Files to search; standard input is read when none are given
    pub files: Vec<String>,
}

impl GrepArgs {
    /// Compile the pattern with the `-i` and `-w` options applied.
    pub fn regex(&self) -> Result<Regex> {
        let pattern = if self.word_regexp {
            format!(r"\b(?:{})\b", self.pattern)
        } else {
            self.pattern.clone()
        };
        Ok(RegexBuilder::new(&pattern)
            .case_insensitive(self.ignore_case)
            .build()?)
    }
}

pub fn run(args: &[String], streams: &mut Streams<'_>) -> Result<i32> {
    let parsed = match GrepArgs::try_parse_from(std::iter::once(GREP).chain(args.iter().map(String::as_str))) {
        Ok(parsed) => parsed,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            write!(streams.stdout, "{}", e.render())?;
            return Ok(0);
        }
        Err(e) => {
            write!(streams.stderr, "{}", e.render())?;
            return Ok(2);
        }
    };

    let regex = parsed.regex()?;

    if parsed.files.is_empty() {
        let reader = BufReader::new(&mut *streams.stdin);
        search(reader, &regex, parsed.after_context, None, &mut *streams.stdout)?;
        streams.stdout.flush()?;
        return Ok(0);
    }

    let label = parsed.files.len() > 1;
    let mut code = 0;
    for path in &parsed.files {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                writeln!(streams.stderr, "{}: {}: {}", GREP, path, describe(&e))?;
                code = 2;
                continue;
            }
        };
        let prefix = label.then_some(path.as_str());
        match search(
            BufReader::new(file),
            &regex,
            parsed.after_context,
            prefix,
            &mut *streams.stdout,
        ) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Err(e.into()),
            Err(e) => {
                writeln!(streams.stderr, "{}: {}: {}", GREP, path, describe(&e))?;
                code = 2;
            }
        }
    }
    streams.stdout.flush()?;
    Ok(code)
}

/// Write the matching lines of `reader`, with `after` lines of trailing
/// context, to `out`.
pub fn search(
    mut reader: impl BufRead,
    regex: &Regex,
    after: usize,
    prefix: Option<&str>,
    out: &mut dyn Write,
) -> io::Result<()> {
    let mut remaining = 0usize;
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        if raw.last() == Some(&b'\n') {
            raw.pop();
        }
        let line = String::from_utf8_lossy(&raw);

        if regex.is_match(&line) {
            print_line(out, prefix, &line)?;
            remaining = after;
        } else if remaining > 0 {
            print_line(out, prefix, &line)?;
            remaining -= 1;
            if remaining == 0 {
                writeln!(out, "{}", CONTEXT_SEPARATOR)?;
            }
        }
    }

    Ok(())
}

fn print_line(out: &mut dyn Write, prefix: Option<&str>, line: &str) -> io::Result<()> {
    match prefix {
        Some(prefix) => writeln!(out, "{}:{}", prefix, line),
        None => writeln!(out, "{}", line),
    }
}
