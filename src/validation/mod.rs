//! Validation of `.augment/mcp-config.json` documents.
//!
//! [`Validator::validate`] takes raw JSON text and makes one pass over it:
//!
//! 1. Parse. Malformed JSON or a non-object root is a schema error at `$`.
//! 2. Read every field into a [`ConfigOverlay`], recording each missing,
//!    unknown, mistyped, or out-of-range value as a [`Diagnostic`]. Invalid
//!    fields are left unset.
//! 3. Resolve the overlay against [`ConfigDefaults`] with
//!    [`resolve_precedence`].
//! 4. Run cross-field consistency checks on the resolved values.
//! 5. Decide: any schema error fails; range errors fail only under
//!    `strictMode`; conflict warnings never fail.
//!
//! Every problem is reported, not just the first. On success the non-fatal
//! findings travel with the result in its [`ValidationReport`].
//!
//! # Example
//!
//! ```rust
//! use augment_mcp_config::validation::validate;
//!
//! let validated = validate(r#"{"version": "1.0", "mcpTypes": ["token"]}"#).unwrap();
//! assert!(validated.config.strict_mode);
//! assert!(validated.config.type_specific_config.is_empty());
//!
//! let err = validate(r#"{"version": "1.0", "mcpTypes": ["invalid"]}"#).unwrap_err();
//! assert!(err.find("mcpTypes[0]").is_some());
//! ```

mod consistency;
mod diagnostics;
mod document;
mod reader;
mod report;
mod type_specific;


use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ConfigDefaults, ConfigOverlay, McpConfig, resolve_precedence};

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, ROOT_PATH, ValidationError};
pub use report::ValidationReport;

/// A configuration that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    /// Resolved configuration with every field populated.
    pub config: McpConfig,
    /// What the document itself set, before any defaults.
    pub overlay: ConfigOverlay,
    /// Non-fatal findings; `report.valid` is always true here.
    pub report: ValidationReport,
}

/// Validates documents against one set of lower precedence layers.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'d> {
    defaults: &'d ConfigDefaults,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new(ConfigDefaults::builtin())
    }
}

impl<'d> Validator<'d> {
    #[must_use]
    pub const fn new(defaults: &'d ConfigDefaults) -> Self {
        Self {
            defaults,
        }
    }

    /// Parse, validate, and resolve `raw`.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] holding every diagnostic from the pass when at
    /// least one of them is fatal under the effective `strictMode`.
    pub fn validate(&self, raw: &str) -> Result<ValidatedConfig, ValidationError> {
        let mut diags = Diagnostics::new();

        let root: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                diags.schema(ROOT_PATH, "JSON object", format!("malformed JSON ({e})"));
                return Err(reject(diags, self.defaults.module.strict_mode));
            }
        };
        let Some(object) = root.as_object() else {
            diags.schema(ROOT_PATH, "JSON object", reader::json_type(&root));
            return Err(reject(diags, self.defaults.module.strict_mode));
        };

        let overlay = document::read_document(object, &mut diags);
        let config = resolve_precedence(&overlay, self.defaults);
        consistency::check_consistency(&overlay, &config, &mut diags);

        let strict_mode = config.strict_mode;
        if diags.has_fatal(strict_mode) {
            return Err(reject(diags, strict_mode));
        }

        let report = ValidationReport::from_diagnostics(diags.as_slice(), strict_mode);
        for warning in &report.warnings {
            warn!("MCP configuration: {warning}");
        }
        debug!(
            "MCP configuration valid: types={:?} strict={strict_mode}",
            config.mcp_types
        );

        Ok(ValidatedConfig {
            config,
            overlay,
            report,
        })
    }
}

fn reject(diags: Diagnostics, strict_mode: bool) -> ValidationError {
    let error = ValidationError::new(diags.into_vec(), strict_mode);
    debug!(
        "MCP configuration rejected with {} error(s)",
        error.errors().count()
    );
    error
}

/// Validate `raw` against [`ConfigDefaults::builtin`].
///
/// # Errors
///
/// See [`Validator::validate`].
pub fn validate(raw: &str) -> Result<ValidatedConfig, ValidationError> {
    Validator::default().validate(raw)
}
