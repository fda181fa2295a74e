//! Validation results structure for machine and human consumption.

use colored::Colorize;
use serde::Serialize;

use super::diagnostics::Diagnostic;

/// Outcome of one validation pass, split by fatality.
///
/// # JSON Output Example
///
/// ```json
/// {
///   "valid": true,
///   "strict_mode": false,
///   "errors": [],
///   "warnings": [
///     {
///       "kind": "ConflictWarning",
///       "path": "typeSpecificConfig.hybrid.budgetAllocation",
///       "message": "budget shares sum to 1.1, expected 1.0"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// True when nothing in `errors`
    pub valid: bool,
    /// Strictness the diagnostics were judged under
    pub strict_mode: bool,
    /// Findings that block loading
    pub errors: Vec<Diagnostic>,
    /// Findings that were logged and tolerated
    pub warnings: Vec<Diagnostic>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            valid: true,
            strict_mode: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationReport {
    /// Partition `diagnostics` by whether they are fatal under `strict_mode`.
    #[must_use]
    pub fn from_diagnostics(diagnostics: &[Diagnostic], strict_mode: bool) -> Self {
        let (errors, warnings): (Vec<Diagnostic>, Vec<Diagnostic>) = diagnostics
            .iter()
            .cloned()
            .partition(|d| d.is_fatal(strict_mode));
        Self {
            valid: errors.is_empty(),
            strict_mode,
            errors,
            warnings,
        }
    }

    /// One line per finding, `✗` for errors and `⚠` for warnings, followed by
    /// a `✓` summary line when the configuration is usable.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.errors.len() + self.warnings.len() + 1);
        for error in &self.errors {
            lines.push(format!("{} {error}", "✗".red()));
        }
        for warning in &self.warnings {
            lines.push(format!("{} {warning}", "⚠".yellow()));
        }
        if self.valid {
            let summary = if self.warnings.is_empty() {
                "✓ Valid MCP configuration".to_string()
            } else {
                format!(
                    "✓ Valid MCP configuration with {} warning(s)",
                    self.warnings.len()
                )
            };
            lines.push(summary.green().to_string());
        }
        lines.join("\n")
    }

    /// # Errors
    ///
    /// Never in practice; diagnostics contain only strings.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
