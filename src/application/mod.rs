//! Application layer: the interactive menu session
//!
//! Orchestrates the domain tree over generic input/output handles.

pub mod error;
pub mod error_ext;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use session::{MenuChoice, Session};
