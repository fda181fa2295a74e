//! Error handling for MCP configuration loading
//!
//! Two layers, as elsewhere in the crate:
//! 1. **Strongly-typed errors** ([`McpConfigError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for whoever reads the terminal
//!
//! Validation problems are not individual variants here. They are collected
//! into a [`ValidationError`] and carried whole by
//! [`McpConfigError::Validation`], so one failed load reports every problem in
//! the document.
//!
//! # Examples
//!
//! ```rust,no_run
//! use augment_mcp_config::config::find_config;
//! use augment_mcp_config::core::user_friendly_error;
//!
//! if let Err(e) = find_config() {
//!     user_friendly_error(anyhow::Error::from(e)).display();
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

use super::file_error::FileOperationError;
use crate::constants::{CONFIG_DIR, CONFIG_FILE_NAME, CONFIG_PATH_ENV};
use crate::validation::ValidationError;

/// Failures while locating, reading, or validating a configuration file.
#[derive(Error, Debug)]
pub enum McpConfigError {
    /// No `.augment/mcp-config.json` between the start directory and the root.
    #[error("MCP configuration not found (searched from {})", .searched_from.display())]
    ConfigNotFound {
        /// Directory the upward search started from
        searched_from: PathBuf,
    },

    /// `AUGMENT_MCP_CONFIG` names a file that does not exist.
    #[error("MCP configuration file does not exist: {}", .path.display())]
    ConfigPathNotFound {
        /// The explicit path that was given
        path: PathBuf,
    },

    /// I/O failure with file operation context.
    #[error(transparent)]
    FileOperation(#[from] FileOperationError),

    #[error("MCP configuration {} is too large ({size} bytes, limit {max})", .path.display())]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max: u64,
    },

    /// The document was read but has at least one fatal problem.
    #[error("{} is not valid: {source}", .path.display())]
    Validation {
        /// File the document came from
        path: PathBuf,
        /// Every diagnostic from the validation pass
        #[source]
        source: ValidationError,
    },

    /// Anything not covered above.
    #[error("{message}")]
    Other {
        message: String,
    },
}

/// An [`McpConfigError`] with an optional suggestion and details for display.
#[derive(Debug)]
pub struct ErrorContext {
    pub error: McpConfigError,
    /// Actionable next step, shown in green
    pub suggestion: Option<String>,
    /// Background on the failure, shown in yellow
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: McpConfigError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion.
///
/// [`McpConfigError`] and [`FileOperationError`] get specific advice, also
/// when wrapped in `anyhow` context; anything else becomes
/// [`McpConfigError::Other`].
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<McpConfigError>() {
        Ok(config_error) => return create_error_context(config_error),
        Err(error) => error,
    };
    let error = match error.downcast::<FileOperationError>() {
        Ok(file_error) => return create_error_context(McpConfigError::FileOperation(file_error)),
        Err(error) => error,
    };

    ErrorContext::new(McpConfigError::Other {
        message: format!("{error:#}"),
    })
    .with_details("An unexpected error occurred. Please report this issue if it persists.")
}

/// Attach the suggestion and details that fit `error`.
#[must_use]
pub fn create_error_context(error: McpConfigError) -> ErrorContext {
    match &error {
        McpConfigError::ConfigNotFound {
            searched_from,
        } => {
            let details = format!(
                "Searched for {CONFIG_DIR}/{CONFIG_FILE_NAME} in {} and every parent directory",
                searched_from.display()
            );
            ErrorContext::new(error)
                .with_suggestion(format!(
                    "Create {CONFIG_DIR}/{CONFIG_FILE_NAME} in your project root, or set {CONFIG_PATH_ENV} to its location"
                ))
                .with_details(details)
        }
        McpConfigError::ConfigPathNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(format!("Check the path in {CONFIG_PATH_ENV} or unset it"))
            .with_details(format!("{CONFIG_PATH_ENV} overrides configuration discovery")),
        McpConfigError::FileOperation(file_error) => {
            let details = file_error.user_message();
            let suggestion = match file_error.source.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    "Check file permissions and try running with appropriate privileges"
                }
                _ => "Check that the path exists and you have the necessary permissions",
            };
            ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
        }
        McpConfigError::FileTooLarge {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the path points at the MCP configuration and not another file")
            .with_details("Configuration files are limited to 1 MiB"),
        McpConfigError::Validation {
            source,
            ..
        } => {
            let suggestion = if source.strict_mode {
                "Fix the listed fields, or set \"strictMode\": false to fall back to defaults for out-of-range values"
            } else {
                "Fix the listed fields; structural errors are fatal even with strictMode off"
            };
            let details = format!(
                "{} error(s), {} warning(s)",
                source.errors().count(),
                source.warnings().count()
            );
            ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
        }
        McpConfigError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
