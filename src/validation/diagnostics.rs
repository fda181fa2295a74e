//! Diagnostics produced while validating a configuration document.
//!
//! Validation never stops at the first problem. Every check appends to a
//! [`Diagnostics`] collector, and the caller decides afterwards whether the
//! collected findings are fatal. Whether a finding is fatal depends on its
//! kind and on the document's `strictMode`:
//!
//! | Kind | `strictMode = true` | `strictMode = false` |
//! |------|---------------------|----------------------|
//! | [`Diagnostic::SchemaError`] | fatal | fatal |
//! | [`Diagnostic::RangeError`] | fatal | warning, default substituted |
//! | [`Diagnostic::ConflictWarning`] | warning | warning |

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Path used for problems with the document as a whole.
pub const ROOT_PATH: &str = "$";

/// A single validation finding, located by a JSON path such as
/// `typeSpecificConfig.vector.topK` or `mcpTypes[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum Diagnostic {
    /// Structural violation: missing, unknown, or mistyped field, or a value
    /// outside a closed set.
    #[error("{path}: expected {expected}, found {actual}")]
    SchemaError {
        /// Offending field path
        path: String,
        /// What the schema requires at this path
        expected: String,
        /// What the document contains instead
        actual: String,
    },

    /// Numeric or cardinality bound violation.
    #[error("{path}: {value} is out of range (allowed: {bound})")]
    RangeError {
        /// Offending field path
        path: String,
        /// The rejected value as written in the document
        value: String,
        /// Human-readable description of the allowed range
        bound: String,
    },

    /// Soft inconsistency that never blocks loading.
    #[error("{path}: {message}")]
    ConflictWarning {
        /// Field path the warning is about
        path: String,
        /// Description of the inconsistency
        message: String,
    },
}

/// Discriminant of a [`Diagnostic`], for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// See [`Diagnostic::SchemaError`]
    Schema,
    /// See [`Diagnostic::RangeError`]
    Range,
    /// See [`Diagnostic::ConflictWarning`]
    Conflict,
}

impl Diagnostic {
    /// The field path this diagnostic refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::SchemaError { path, .. }
            | Self::RangeError { path, .. }
            | Self::ConflictWarning { path, .. } => path,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        match self {
            Self::SchemaError { .. } => DiagnosticKind::Schema,
            Self::RangeError { .. } => DiagnosticKind::Range,
            Self::ConflictWarning { .. } => DiagnosticKind::Conflict,
        }
    }

    /// Whether this finding blocks loading under the given strictness.
    #[must_use]
    pub const fn is_fatal(&self, strict_mode: bool) -> bool {
        match self {
            Self::SchemaError { .. } => true,
            Self::RangeError { .. } => strict_mode,
            Self::ConflictWarning { .. } => false,
        }
    }
}

/// Append-only collector threaded through every validation step.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(
        &mut self,
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) {
        self.push(Diagnostic::SchemaError {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        });
    }

    /// Record a missing required field.
    pub fn missing(&mut self, path: impl Into<String>, expected: impl Into<String>) {
        self.schema(path, expected, "missing required field");
    }

    pub fn range(
        &mut self,
        path: impl Into<String>,
        value: impl fmt::Display,
        bound: impl Into<String>,
    ) {
        self.push(Diagnostic::RangeError {
            path: path.into(),
            value: value.to_string(),
            bound: bound.into(),
        });
    }

    pub fn conflict(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::ConflictWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!("validation: {diagnostic}");
        self.items.push(diagnostic);
    }

    #[must_use]
    pub fn has_fatal(&self, strict_mode: bool) -> bool {
        self.items.iter().any(|d| d.is_fatal(strict_mode))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

/// Validation failed: at least one fatal diagnostic was found.
///
/// Carries every diagnostic from the pass, fatal or not, in document order,
/// so the caller can surface all problems at once.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", self.summary())]
pub struct ValidationError {
    /// All findings from the validation pass
    pub diagnostics: Vec<Diagnostic>,
    /// The strictness the findings were judged under
    pub strict_mode: bool,
}

impl ValidationError {
    #[must_use]
    pub fn new(diagnostics: Vec<Diagnostic>, strict_mode: bool) -> Self {
        Self {
            diagnostics,
            strict_mode,
        }
    }

    /// Findings that caused the failure.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.is_fatal(self.strict_mode))
    }

    /// Findings that would not have blocked loading on their own.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| !d.is_fatal(self.strict_mode))
    }

    /// First diagnostic located at `path`, if any.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.path() == path)
    }

    /// Error count headline followed by one line per fatal finding.
    fn summary(&self) -> String {
        let errors: Vec<&Diagnostic> = self.errors().collect();
        let mut out = format!(
            "invalid MCP configuration ({} error{})",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        );
        for error in errors {
            out.push_str(&format!("\n  - {error}"));
        }
        out
    }
}
