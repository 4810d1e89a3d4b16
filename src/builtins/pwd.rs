//! `pwd`

use std::env;
use std::io::Write;

use super::{describe, Streams, PWD};
use crate::error::{Error, Result};

pub fn run(_args: &[String], streams: &mut Streams<'_>) -> Result<i32> {
    let cwd = env::current_dir().map_err(|e| Error::Builtin {
        command: PWD.to_string(),
        message: describe(&e),
    })?;
    writeln!(streams.stdout, "{}", cwd.display())?;
    streams.stdout.flush()?;
    Ok(0)
}
