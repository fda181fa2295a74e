//! Resolved MCP configuration and the layers it is built from.
//!
//! A configuration is assembled from four layers, highest precedence first:
//!
//! 1. **Project config** - `.augment/mcp-config.json`, parsed into a
//!    [`ConfigOverlay`]
//! 2. **Type-specific rules** - one [`RuleLayer`] per selected memory type
//! 3. **Universal rules** - a [`RuleLayer`] applied to every project that keeps
//!    `universalRules` on
//! 4. **Module defaults** - [`ModuleDefaults`], complete values for every field
//!
//! [`resolve_precedence`] folds the layers into an [`McpConfig`] where no field
//! is missing. The lower three layers live in [`ConfigDefaults`];
//! [`ConfigDefaults::builtin`] is the shared instance used by the convenience
//! entry points.
//!
//! # Loading
//!
//! ```rust,no_run
//! use augment_mcp_config::config::{find_config, load_config};
//!
//! # fn example() -> Result<(), augment_mcp_config::core::McpConfigError> {
//! let path = find_config()?;
//! let validated = load_config(&path)?;
//! println!("primary strategy: {:?}", validated.config.primary_type());
//! # Ok(())
//! # }
//! ```
//!
//! Discovery walks up from the current directory looking for
//! `.augment/mcp-config.json`. Setting `AUGMENT_MCP_CONFIG` skips the walk and
//! uses that path directly.

mod defaults;
mod loader;
mod overlay;
mod precedence;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{MemoryType, MonitoringConfig, TypeSettings};

pub use defaults::{ConfigDefaults, ModuleDefaults, RuleLayer};
pub use loader::{find_config, find_config_from, load_config, load_config_with_defaults};
pub use overlay::ConfigOverlay;
pub use precedence::resolve_precedence;

/// A fully resolved configuration: every optional field is populated.
///
/// Serializes to the `.augment/mcp-config.json` format with every field
/// written out, so the output validates back to an equal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpConfig {
    /// Schema version, always `"1.0"`.
    pub version: String,
    /// Selected strategies in priority order.
    pub mcp_types: Vec<MemoryType>,
    /// When true, out-of-range values are fatal instead of falling back.
    pub strict_mode: bool,
    pub universal_rules: bool,
    /// Settings for every type the project or a rule configured.
    pub type_specific_config: BTreeMap<MemoryType, TypeSettings>,
    pub monitoring: MonitoringConfig,
}

/// The output of [`resolve_precedence`].
pub type EffectiveConfig = McpConfig;

impl McpConfig {
    /// The first listed strategy; it wins whenever strategies conflict.
    #[must_use]
    pub fn primary_type(&self) -> Option<MemoryType> {
        self.mcp_types.first().copied()
    }

    /// Resolved settings for `memory_type`, if that type is configured.
    #[must_use]
    pub fn settings_for(&self, memory_type: MemoryType) -> Option<&TypeSettings> {
        self.type_specific_config.get(&memory_type)
    }

    #[must_use]
    pub fn uses(&self, memory_type: MemoryType) -> bool {
        self.mcp_types.contains(&memory_type)
    }

    /// Serialize to the file format, pretty-printed.
    ///
    /// # Errors
    ///
    /// Only fails if a float field holds a non-finite value, which validation
    /// never produces.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
