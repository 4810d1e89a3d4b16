//! # Output Configuration
//!
//! Decides whether the interactive prompt and the shell's own error
//! messages are colored. Output produced by commands is never touched.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust
//! use cli_shell::output::OutputConfig;
//!
//! let config = OutputConfig::from_env_and_flag("never");
//! assert_eq!(config.paint_prompt("> "), "> ");
//! ```

use std::env;

use console::style;

/// Output configuration for the shell's own messages.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether the prompt and error messages are colored.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: `always`, `never` or `auto`.
    /// `always` overrides `NO_COLOR`. In `auto` mode colors are disabled when
    /// `NO_COLOR` is set, `CLICOLOR=0`, `TERM=dumb`, or stderr is not a TTY
    /// (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// A configuration that never colors anything.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Prompt and errors both go to stderr
        console::Term::stderr().features().colors_supported()
    }

    /// Render the prompt.
    pub fn paint_prompt(&self, prompt: &str) -> String {
        if self.use_color {
            style(prompt).cyan().bold().force_styling(true).to_string()
        } else {
            prompt.to_string()
        }
    }

    /// Render an error reported by the shell itself.
    pub fn paint_error(&self, message: &str) -> String {
        if self.use_color {
            style(message).red().force_styling(true).to_string()
        } else {
            message.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
