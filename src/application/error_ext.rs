//! Error conversion helpers for session I/O

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Attach what was being done when the I/O failed.
    ///
    /// # Example
    /// ```ignore
    /// writeln!(out, "{row}").io_context("write tree")?;
    /// ```
    fn io_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn io_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Io {
            context: action.to_string(),
            source,
        })
    }
}
