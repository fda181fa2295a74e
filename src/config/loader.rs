//! Locating and reading `.augment/mcp-config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::ConfigDefaults;
use crate::constants::{CONFIG_DIR, CONFIG_FILE_NAME, CONFIG_PATH_ENV, MAX_CONFIG_FILE_SIZE};
use crate::core::{FileOperation, FileResultExt, McpConfigError};
use crate::validation::{ValidatedConfig, Validator};

/// Locate the configuration for the current process.
///
/// `AUGMENT_MCP_CONFIG`, when set and non-empty, names the file directly.
/// Otherwise the search starts at the current directory and walks up.
///
/// # Errors
///
/// - [`McpConfigError::ConfigPathNotFound`] if the environment variable names
///   a file that does not exist
/// - [`McpConfigError::ConfigNotFound`] if no directory up to the root holds
///   `.augment/mcp-config.json`
/// - [`McpConfigError::FileOperation`] if the current directory is unreadable
pub fn find_config() -> Result<PathBuf, McpConfigError> {
    if let Some(explicit) = std::env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(explicit);
        debug!("Using {CONFIG_PATH_ENV}={}", path.display());
        return if path.is_file() {
            Ok(path)
        } else {
            Err(McpConfigError::ConfigPathNotFound {
                path,
            })
        };
    }

    let current = std::env::current_dir().with_file_context(
        FileOperation::Canonicalize,
        ".",
        "locating MCP configuration",
        "config::loader::find_config",
    )?;
    find_config_from(current)
}

/// Walk from `start` up to the filesystem root looking for
/// `.augment/mcp-config.json`. Returns the first match.
///
/// # Errors
///
/// [`McpConfigError::ConfigNotFound`] when the root is reached without a match.
pub fn find_config_from(start: impl Into<PathBuf>) -> Result<PathBuf, McpConfigError> {
    let start = start.into();
    let mut current = start.clone();
    loop {
        let candidate = current.join(CONFIG_DIR).join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!("Found MCP configuration at {}", candidate.display());
            return Ok(candidate);
        }

        if !current.pop() {
            return Err(McpConfigError::ConfigNotFound {
                searched_from: start,
            });
        }
    }
}

/// Read and validate the file at `path` against the built-in defaults.
///
/// # Errors
///
/// See [`load_config_with_defaults`].
pub fn load_config(path: &Path) -> Result<ValidatedConfig, McpConfigError> {
    load_config_with_defaults(path, ConfigDefaults::builtin())
}

/// Read and validate the file at `path` against `defaults`.
///
/// # Errors
///
/// - [`McpConfigError::FileOperation`] if the file cannot be read
/// - [`McpConfigError::FileTooLarge`] above 1 MiB
/// - [`McpConfigError::Validation`] with every diagnostic if the document has
///   a fatal problem
pub fn load_config_with_defaults(
    path: &Path,
    defaults: &ConfigDefaults,
) -> Result<ValidatedConfig, McpConfigError> {
    let caller = "config::loader::load_config";
    let metadata = fs::metadata(path).with_file_context(
        FileOperation::Metadata,
        path,
        "checking MCP configuration size",
        caller,
    )?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(McpConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_CONFIG_FILE_SIZE,
        });
    }

    let raw = fs::read_to_string(path).with_file_context(
        FileOperation::Read,
        path,
        "loading MCP configuration",
        caller,
    )?;

    let validated = Validator::new(defaults).validate(&raw).map_err(|source| {
        McpConfigError::Validation {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "Loaded MCP configuration from {} ({} type(s), {} warning(s))",
        path.display(),
        validated.config.mcp_types.len(),
        validated.report.warnings.len()
    );
    Ok(validated)
}
