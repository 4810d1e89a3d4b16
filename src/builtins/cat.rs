//! `cat [FILE...]`

use std::fs::File;
use std::io::{self, Write};

use super::{describe, Streams, CAT};
use crate::error::Result;

/// Copy each file to stdout in order, or stdin when no file is given.
pub fn run(args: &[String], streams: &mut Streams<'_>) -> Result<i32> {
    if args.is_empty() {
        io::copy(&mut *streams.stdin, &mut *streams.stdout)?;
        streams.stdout.flush()?;
        return Ok(0);
    }

    let mut code = 0;
    for path in args {
        let copied = File::open(path).and_then(|mut file| io::copy(&mut file, &mut *streams.stdout));
        match copied {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Err(e.into()),
            Err(e) => {
                writeln!(streams.stderr, "{}: {}: {}", CAT, path, describe(&e))?;
                code = 1;
            }
        }
    }
    streams.stdout.flush()?;
    Ok(code)
}
