//! A single stage of a pipeline: a program name and its arguments.

use std::fmt;

use crate::builtins;
use crate::error::{Error, Result};

/// A command ready to run, after variable expansion and quote removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    args: Vec<String>,
}

impl Command {
    /// Build a command from its words; the first word is the program name.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words.into_iter().map(Into::into);
        let name = words.next().ok_or(Error::EmptyCommand)?;
        Ok(Self {
            name,
            args: words.collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_exit(&self) -> bool {
        self.name == builtins::EXIT
    }

    /// Whether this command is handled inside the shell process.
    pub fn is_builtin(&self) -> bool {
        builtins::is_builtin(&self.name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_with_arguments() {
        let command = Command::new(["echo", "Hello", "World"]).unwrap();
        assert_eq!(command.name(), "echo");
        assert_eq!(command.args(), ["Hello", "World"]);
    }

    #[test]
    fn test_command_without_arguments() {
        let command = Command::new(["pwd"]).unwrap();
        assert_eq!(command.name(), "pwd");
        assert!(command.args().is_empty());
    }

    #[test]
    fn test_empty_command_is_error() {
        let result = Command::new(Vec::<String>::new());
        assert!(matches!(result, Err(Error::EmptyCommand)));
    }

    #[test]
    fn test_is_exit() {
        assert!(!Command::new(["echo", "Test"]).unwrap().is_exit());
        assert!(Command::new(["exit"]).unwrap().is_exit());
        assert!(Command::new(["exit", "3"]).unwrap().is_exit());
    }

    #[test]
    fn test_is_builtin() {
        for name in ["cat", "echo", "wc", "pwd", "grep", "exit"] {
            assert!(Command::new([name]).unwrap().is_builtin(), "{name}");
        }
        assert!(!Command::new(["ls"]).unwrap().is_builtin());
    }

    #[test]
    fn test_display() {
        let command = Command::new(["grep", "-i", "error"]).unwrap();
        assert_eq!(command.to_string(), "grep -i error");
    }
}
