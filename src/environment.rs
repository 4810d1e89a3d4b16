//! Shell variable storage.

use log::{debug, trace};
use std::collections::HashMap;

/// Name of the variable that holds the exit status of the last command.
pub const STATUS_VAR: &str = "?";

/// Variables visible to `$NAME` expansion.
///
/// The store always contains [`STATUS_VAR`], initialised to `"0"`.
#[derive(Debug, Clone)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Create an environment holding only the status variable.
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        vars.insert(STATUS_VAR.to_string(), "0".to_string());
        Self { vars }
    }

    /// Create an environment seeded with the variables of the current process.
    pub fn from_process() -> Self {
        let mut env = Self::new();
        for (key, value) in std::env::vars() {
            env.vars.insert(key, value);
        }
        env
    }

    /// Value of `name`, or an empty string when it is unset.
    pub fn get(&self, name: &str) -> &str {
        let value = self.vars.get(name).map(String::as_str).unwrap_or("");
        trace!("lookup ${} -> {:?}", name, value);
        value
    }

    /// Set or overwrite a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        debug!("set {}={:?}", name, value);
        self.vars.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Record the exit status of the last command in `$?`.
    pub fn set_status(&mut self, code: i32) {
        self.set(STATUS_VAR, code.to_string());
    }

    /// Exit status of the last command, as stored in `$?`.
    pub fn status(&self) -> i32 {
        self.get(STATUS_VAR).parse().unwrap_or(0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
