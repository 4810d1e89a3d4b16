//! Shared test utilities for E2E tests.
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_file("notes.txt", "hello\n");
//!     fixture
//!         .shell("cat notes.txt\n")
//!         .assert()
//!         .success()
//!         .stdout("hello\n");
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::texts;
    pub use super::TestFixture;
}

/// File contents shared by several tests.
#[allow(dead_code)]
pub mod texts {
    /// Two lines, one with a tab.
    pub const SIMPLE: &str = "Hello from file!!!\nHello from file\tagain!!!\n";

    /// A small log with mixed-case matches for `grep`.
    pub const LOG: &str = "This is an ERROR message\n\
                           This is a warning\n\
                           Nothing important here\n\
                           Not whole worldERROR\n\
                           Another ERROR found\n\
                           Log: all systems normal\n";
}

/// A temporary working directory for running the `cli-shell` binary.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_file("test.txt", "hello world");
///
/// fixture
///     .command()
///     .args(["-c", "wc test.txt"])
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    ///
    /// Colors are turned off and `NO_COLOR` is set so output can be
    /// compared byte for byte.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cli-shell");
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("CLI_SHELL_LOG")
            .env_remove("CLI_SHELL_PROMPT");
        cmd
    }

    /// Create a command that reads `script` from standard input.
    pub fn shell(&self, script: &str) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.write_stdin(script.to_string());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_file() {
        let fixture = TestFixture::new().with_file("test.txt", "hello");
        assert!(fixture.path().join("test.txt").exists());
    }
}
