//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::ConfigNotFound(_) => crate::exitcode::NOINPUT,
                ApplicationError::Io { .. } => crate::exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn given_missing_config_when_mapping_then_noinput() {
        let err = CliError::from(ApplicationError::ConfigNotFound(PathBuf::from("x.toml")));
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
        assert_eq!(err.to_string(), "config file not found: x.toml");
    }

    #[test]
    fn given_invalid_args_when_mapping_then_usage() {
        let err = CliError::InvalidArgs("no values".into());
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }
}
