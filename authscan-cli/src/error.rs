//! CLI-specific error types and exit code mapping

use authscan_classifier::ClassifierError;
use authscan_core::error::{AuthscanError, ConfigError};

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The log file to scan does not exist.
    #[error("log file not found: {0}")]
    InputNotFound(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Classifier domain error.
    #[error("classifier error: {0}")]
    Classifier(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                    |
    /// |------|----------------------------|
    /// | 0    | Success                    |
    /// | 1    | General / command error    |
    /// | 2    | Configuration error        |
    /// | 3    | Input log file not found   |
    /// | 10   | IO error                   |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::InputNotFound(_) => 3,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Classifier(_) => 1,
        }
    }
}

impl From<AuthscanError> for CliError {
    fn from(e: AuthscanError) -> Self {
        match e {
            AuthscanError::Config(ConfigError::FileNotFound { path }) => {
                Self::Config(format!("config file not found: {path}"))
            }
            AuthscanError::Config(inner) => Self::Config(inner.to_string()),
            AuthscanError::Io(io) => Self::Io(io),
            AuthscanError::Classifier(msg) => Self::Classifier(msg),
        }
    }
}

impl From<ClassifierError> for CliError {
    fn from(e: ClassifierError) -> Self {
        match e {
            ClassifierError::SourceNotFound { path } => Self::InputNotFound(path),
            ClassifierError::Config { field, reason } => {
                Self::Config(format!("{field}: {reason}"))
            }
            ClassifierError::Io(io) => Self::Io(io),
            other => Self::Classifier(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_input_not_found() {
        let err = CliError::InputNotFound("Auth.log".to_owned());
        assert_eq!(err.exit_code(), 3, "missing input should return exit code 3");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("unknown kind".to_owned());
        assert_eq!(err.exit_code(), 1, "command error should return exit code 1");
    }

    #[test]
    fn test_error_display_input_not_found() {
        let err = CliError::InputNotFound("Auth.log".to_owned());
        assert_eq!(err.to_string(), "log file not found: Auth.log");
    }

    #[test]
    fn test_from_classifier_source_not_found() {
        let cli_err: CliError = ClassifierError::SourceNotFound {
            path: "/var/log/auth.log".to_owned(),
        }
        .into();
        match cli_err {
            CliError::InputNotFound(path) => assert_eq!(path, "/var/log/auth.log"),
            other => panic!("expected InputNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_from_classifier_rule_compile() {
        let cli_err: CliError = ClassifierError::RuleCompile {
            rule_id: "success".to_owned(),
            reason: "bad".to_owned(),
        }
        .into();
        assert_eq!(cli_err.exit_code(), 1);
        assert!(cli_err.to_string().contains("success"));
    }

    #[test]
    fn test_from_core_config_error() {
        let core_err = AuthscanError::Config(ConfigError::InvalidValue {
            field: "general.log_level".to_owned(),
            reason: "must be one of: trace".to_owned(),
        });
        let cli_err: CliError = core_err.into();
        assert_eq!(cli_err.exit_code(), 2);
        assert!(cli_err.to_string().contains("general.log_level"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let cli_err: CliError = io_err.into();
        match cli_err {
            CliError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied),
            _ => panic!("expected Io error variant"),
        }
    }
}
