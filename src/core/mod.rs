//! Core error types shared by loading and validation.
//!
//! - [`McpConfigError`] - everything that can go wrong finding, reading, or
//!   validating the configuration file
//! - [`ErrorContext`] / [`user_friendly_error`] - coloured, actionable output
//!   for terminal users
//! - [`FileOperationError`] / [`FileResultExt`] - I/O errors that remember which
//!   file and why

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, McpConfigError, create_error_context, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
