//! `exit [N]`

use super::EXIT;
use crate::error::{Error, Result};

/// The status the session should end with.
///
/// Like other shells, only the low eight bits of `N` are kept.
pub fn status(args: &[String]) -> Result<i32> {
    match args {
        [] => Ok(0),
        [code] => code
            .parse::<i64>()
            .map(|code| (code & 0xff) as i32)
            .map_err(|_| Error::Usage {
                command: EXIT.to_string(),
                message: format!("{}: numeric argument required", code),
            }),
        _ => Err(Error::Usage {
            command: EXIT.to_string(),
            message: "too many arguments".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exit_defaults_to_zero() {
        assert_eq!(status(&[]).unwrap(), 0);
    }

    #[test]
    fn test_exit_with_code() {
        assert_eq!(status(&args(&["3"])).unwrap(), 3);
        assert_eq!(status(&args(&["256"])).unwrap(), 0);
        assert_eq!(status(&args(&["-1"])).unwrap(), 255);
    }

    #[test]
    fn test_exit_non_numeric() {
        let error = status(&args(&["abc"])).unwrap_err();
        assert!(error.to_string().contains("numeric argument required"));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_too_many_arguments() {
        let error = status(&args(&["1", "2"])).unwrap_err();
        assert!(error.to_string().contains("too many arguments"));
    }
}
