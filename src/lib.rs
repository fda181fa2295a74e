//! augment-mcp-config - memory strategy configuration for Augment agents
//!
//! Loads and validates `.augment/mcp-config.json`, the per-project file that
//! selects which context-management strategies ("MCP types") an agent runtime
//! uses and how each one is tuned.
//!
//! # Architecture Overview
//!
//! A configuration is resolved from four layers, highest precedence first:
//! - the project document
//! - type-specific rules for each selected strategy
//! - universal rules shared by every project
//! - module defaults, which fill every field
//!
//! Validation makes one pass over the document and reports every problem it
//! finds. Schema errors always fail; out-of-range values fail only under
//! `strictMode` and otherwise fall back to the lower layers; cross-field
//! conflicts are logged as warnings.
//!
//! # Core Modules
//!
//! - [`schema`] - memory types and the per-type settings records
//! - [`validation`] - [`validate`] and the diagnostic taxonomy
//! - [`config`] - [`McpConfig`], precedence resolution, discovery and loading
//! - [`monitoring`] - tracing setup and token-usage tracking from the `monitoring` block
//! - [`core`] - error types and user-facing error formatting
//! - [`constants`] - file locations, limits, and the schema version
//!
//! # Example
//!
//! ```rust
//! use augment_mcp_config::schema::MemoryType;
//! use augment_mcp_config::validate;
//!
//! let validated = validate(
//!     r#"{
//!         "version": "1.0",
//!         "mcpTypes": ["token", "vector"],
//!         "typeSpecificConfig": {"token": {"compressionThreshold": 0.6}}
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(validated.config.primary_type(), Some(MemoryType::Token));
//! assert!(validated.config.settings_for(MemoryType::Token).is_some());
//! ```

pub mod config;
pub mod constants;
pub mod core;
pub mod monitoring;
pub mod schema;
pub mod validation;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{McpConfig, load_config};
pub use validation::{ValidatedConfig, ValidationError, validate};
