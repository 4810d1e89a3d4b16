//! `wc [FILE...]`
//!
//! Prints newline, word and byte counts, each right-aligned in a column of
//! width 7. With more than one file a `total` row follows.

use std::fs::File;
use std::io::{self, Read, Write};
use std::ops::AddAssign;

use super::{describe, Streams, WC};
use crate::error::Result;

const WIDTH: usize = 7;

/// Line, word and byte counts for one input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub lines: u64,
    pub words: u64,
    pub bytes: u64,
}

impl Counts {
    /// Count a whole stream. Lines are `\n` bytes; words are runs of
    /// non-whitespace bytes.
    pub fn of(mut reader: impl Read) -> io::Result<Self> {
        let mut counts = Counts::default();
        let mut in_word = false;
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            counts.bytes += n as u64;
            for &byte in &buf[..n] {
                if byte == b'\n' {
                    counts.lines += 1;
                }
                if byte.is_ascii_whitespace() {
                    in_word = false;
                } else if !in_word {
                    in_word = true;
                    counts.words += 1;
                }
            }
        }
        Ok(counts)
    }

    fn render(&self, name: Option<&str>) -> String {
        let row = format!(
            "{:>w$} {:>w$} {:>w$}",
            self.lines,
            self.words,
            self.bytes,
            w = WIDTH
        );
        match name {
            Some(name) => format!("{} {}", row, name),
            None => row,
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.words += other.words;
        self.bytes += other.bytes;
    }
}

pub fn run(args: &[String], streams: &mut Streams<'_>) -> Result<i32> {
    if args.is_empty() {
        let counts = Counts::of(&mut *streams.stdin)?;
        writeln!(streams.stdout, "{}", counts.render(None))?;
        streams.stdout.flush()?;
        return Ok(0);
    }

    let mut code = 0;
    let mut total = Counts::default();
    for path in args {
        match File::open(path).and_then(Counts::of) {
            Ok(counts) => {
                total += counts;
                writeln!(streams.stdout, "{}", counts.render(Some(path)))?;
            }
            Err(e) => {
                writeln!(streams.stderr, "{}: {}: {}", WC, path, describe(&e))?;
                code = 1;
            }
        }
    }
    if args.len() > 1 {
        writeln!(streams.stdout, "{}", total.render(Some("total")))?;
    }
    streams.stdout.flush()?;
    Ok(code)
}
