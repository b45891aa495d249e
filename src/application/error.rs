//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised around the tree: configuration, session I/O.
/// Tree operations themselves never fail.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
