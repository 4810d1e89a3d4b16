//! # Command Line Parsing
//!
//! This module turns one line of input into either a variable assignment or
//! a pipeline of [`Command`]s. Parsing happens in four steps:
//!
//! 1. **Tokenizing**: the line is split on unquoted whitespace. An unquoted
//!    `|` is always a token of its own. Quoted runs are kept verbatim, quotes
//!    included, and glue to the text around them (`aaa"bbb"ccc` is one token).
//! 2. **Assignment detection**: a line made of a single `NAME=VALUE` token
//!    assigns a variable instead of running anything.
//! 3. **Expansion**: `$NAME` and `$?` are replaced in every token, except
//!    inside single quotes. The expanded text is tokenized again, so a
//!    variable may expand to several words or even to a `|`.
//! 4. **Quote removal**: the words between pipes are unquoted and become
//!    commands.
//!
//! ## Quoting rules
//!
//! - `'...'` is literal: no expansion, no escapes.
//! - `"..."` allows expansion. A backslash escapes `"`, `\` and `$`;
//!   `\n` and `\t` become a newline and a tab. Other backslashes are kept.
//! - Outside quotes a backslash is an ordinary character.
//!
//! Text produced by an expansion is never reinterpreted as quoting: quote
//! characters in a variable value come out literally.

use log::debug;

use crate::command::Command;
use crate::environment::{Environment, STATUS_VAR};
use crate::error::{Error, Result};

/// Token that separates the stages of a pipeline.
pub const PIPE: &str = "|";

/// The result of parsing a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// `NAME=VALUE`; the value has already been expanded and unquoted.
    Assignment { name: String, value: String },
    /// Commands connected by pipes, in order. May be empty when every word
    /// expanded to nothing.
    Pipeline(Vec<Command>),
}

/// Parse an input line using `env` for variable expansion.
///
/// The environment is only read; assignments are returned to the caller.
pub fn parse(line: &str, env: &Environment) -> Result<Parsed> {
    let line = line.trim();
    if line.is_empty() {
        return Err(Error::EmptyInput);
    }

    let tokens = tokenize(line)?;

    if let [token] = tokens.as_slice() {
        if let Some((name, raw)) = assignment(token) {
            if raw.is_empty() {
                return Err(Error::EmptyAssignment {
                    name: name.to_string(),
                });
            }
            let value = unquote(&substitute(raw, env));
            return Ok(Parsed::Assignment {
                name: name.to_string(),
                value,
            });
        }
    }

    let mut words = Vec::with_capacity(tokens.len());
    for token in &tokens {
        words.extend(tokenize(&substitute(token, env))?);
    }

    if words.is_empty() {
        return Ok(Parsed::Pipeline(Vec::new()));
    }

    let mut commands = Vec::new();
    let mut stage = Vec::new();
    for word in words {
        if word == PIPE {
            if stage.is_empty() {
                return Err(Error::EmptyStage);
            }
            commands.push(Command::new(stage.drain(..))?);
        } else {
            stage.push(unquote(&word));
        }
    }
    if stage.is_empty() {
        return Err(Error::EmptyStage);
    }
    commands.push(Command::new(stage)?);

    debug!(
        "parsed pipeline: {}",
        commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    );
    Ok(Parsed::Pipeline(commands))
}

/// Split a line into raw tokens, keeping quotes in place.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    fn flush(current: &mut String, tokens: &mut Vec<String>) {
        if !current.is_empty() {
            tokens.push(std::mem::take(current));
        }
    }

    while let Some(ch) = chars.next() {
        match ch {
            '|' => {
                flush(&mut current, &mut tokens);
                tokens.push(PIPE.to_string());
            }
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            '\'' => {
                current.push(ch);
                loop {
                    match chars.next() {
                        Some('\'') => {
                            current.push('\'');
                            break;
                        }
                        Some(c) => current.push(c),
                        None => return Err(unclosed('\'')),
                    }
                }
            }
            '"' => {
                current.push(ch);
                loop {
                    match chars.next() {
                        Some('"') => {
                            current.push('"');
                            break;
                        }
                        Some('\\') => {
                            current.push('\\');
                            match chars.next() {
                                Some(c) => current.push(c),
                                None => return Err(unclosed('"')),
                            }
                        }
                        Some(c) => current.push(c),
                        None => return Err(unclosed('"')),
                    }
                }
            }
            c => current.push(c),
        }
    }
    flush(&mut current, &mut tokens);

    Ok(tokens)
}

fn unclosed(quote: char) -> Error {
    let hint = match quote {
        '"' => "add the closing \" or write \\\" for a literal quote",
        _ => "add the closing ' (nothing can be escaped inside single quotes)",
    };
    Error::UnclosedQuote {
        quote,
        hint: Some(hint.to_string()),
    }
}

/// Replace `$NAME` and `$?` in a raw token, leaving quotes in place.
///
/// Nothing is expanded inside single quotes. Values are escaped so that
/// tokenizing and unquoting the result yields them unchanged.
pub fn substitute(token: &str, env: &Environment) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some('\''), '\'') | (Some('"'), '"') => {
                quote = None;
                out.push(ch);
            }
            (Some('\''), _) => out.push(ch),
            (Some(_), '\\') => {
                out.push(ch);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            (None, '\'' | '"') => {
                quote = Some(ch);
                out.push(ch);
            }
            (_, '$') => {
                let mut name = String::new();
                match chars.peek().copied() {
                    Some('?') => {
                        chars.next();
                        name.push_str(STATUS_VAR);
                    }
                    Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                        while let Some(c) =
                            chars.next_if(|c| c.is_ascii_alphanumeric() || *c == '_')
                        {
                            name.push(c);
                        }
                    }
                    _ => {}
                }
                if name.is_empty() {
                    out.push('$');
                } else {
                    escape_value(env.get(&name), quote.is_some(), &mut out);
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

fn escape_value(value: &str, in_double_quotes: bool, out: &mut String) {
    for c in value.chars() {
        match (in_double_quotes, c) {
            (true, '"' | '\\' | '$') => {
                out.push('\\');
                out.push(c);
            }
            (false, '\'') => out.push_str("\"'\""),
            (false, '"') => out.push_str("'\"'"),
            _ => out.push(c),
        }
    }
}

/// Remove quotes from a token and process escapes inside double quotes.
pub fn unquote(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                for c in chars.by_ref() {
                    if c == '\'' {
                        break;
                    }
                    out.push(c);
                }
            }
            '"' => loop {
                match chars.next() {
                    None | Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some('n') => out.push('\n'),
                        Some('t') => out.push('\t'),
                        Some(c @ ('"' | '\\' | '$')) => out.push(c),
                        Some(c) => {
                            out.push('\\');
                            out.push(c);
                        }
                        None => out.push('\\'),
                    },
                    Some(c) => out.push(c),
                }
            },
            c => out.push(c),
        }
    }

    out
}

/// Split a `NAME=VALUE` token. The value is returned raw, quotes included.
pub fn assignment(token: &str) -> Option<(&str, &str)> {
    let (name, value) = token.split_once('=')?;
    is_identifier(name).then_some((name, value))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
