use std::path::PathBuf;
use thiserror::Error;

/// Worker exit status for a task whose payload could not be trusted
pub const STATUS_MALFORMED_PAYLOAD: i32 = 3;

/// Worker exit status for a failure inside the worker itself
pub const STATUS_INTERNAL_ERROR: i32 = 5;

/// Unified error type for treebump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Task verification failed: {0}")]
    TaskVerification(String),

    #[error("Version bump failed! Intended {intended}, actual: {actual} in {}", .path.display())]
    BumpVerification {
        intended: String,
        actual: String,
        path: PathBuf,
    },

    #[error("Did not expect no changes replacing '{version}' in {}", .path.display())]
    UnchangedReplace { path: PathBuf, version: String },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed")]
    Git(#[from] git2::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in treebump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a task verification error with context
    pub fn task_verification(msg: impl Into<String>) -> Self {
        BumpError::TaskVerification(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Process exit status the host worker should report for this failure.
    ///
    /// Bad task input maps to malformed-payload; everything that went wrong
    /// after the input was accepted maps to internal-error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BumpError::TaskVerification(_) | BumpError::Config(_) => STATUS_MALFORMED_PAYLOAD,
            BumpError::BumpVerification { .. }
            | BumpError::UnchangedReplace { .. }
            | BumpError::Version(_)
            | BumpError::Git(_)
            | BumpError::Io(_) => STATUS_INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_verification_display() {
        let err = BumpError::BumpVerification {
            intended: "60.0".to_string(),
            actual: "59.0".to_string(),
            path: PathBuf::from("/repo/config/milestone.txt"),
        };
        assert_eq!(
            err.to_string(),
            "Version bump failed! Intended 60.0, actual: 59.0 in /repo/config/milestone.txt"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BumpError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert_eq!(err.exit_code(), STATUS_INTERNAL_ERROR);
    }

    #[test]
    fn test_wrapped_errors_keep_message_in_source_only() {
        use std::error::Error as _;

        let err: BumpError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found").into();
        assert_eq!(err.to_string(), "I/O error");
        assert_eq!(err.source().unwrap().to_string(), "file not found");

        let err: BumpError = git2::Error::from_str("index locked").into();
        assert_eq!(err.to_string(), "Git operation failed");
        assert!(err.source().unwrap().to_string().contains("index locked"));
    }

    #[test]
    fn test_exit_codes_separate_bad_input_from_internal_failure() {
        assert_eq!(
            BumpError::task_verification("not in whitelist").exit_code(),
            STATUS_MALFORMED_PAYLOAD
        );
        assert_eq!(
            BumpError::config("bad toml").exit_code(),
            STATUS_MALFORMED_PAYLOAD
        );
        assert_eq!(
            BumpError::version("60.0esr").exit_code(),
            STATUS_INTERNAL_ERROR
        );
        let unchanged = BumpError::UnchangedReplace {
            path: PathBuf::from("version.txt"),
            version: "59.0".to_string(),
        };
        assert_eq!(unchanged.exit_code(), STATUS_INTERNAL_ERROR);
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (BumpError::task_verification("x"), "Task verification failed"),
            (BumpError::version("x"), "Version parsing error"),
            (BumpError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
