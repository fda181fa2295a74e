//! Lower precedence layers: module defaults plus universal and per-type rules.
//!
//! The layers are plain immutable data. The validator and resolver borrow a
//! [`ConfigDefaults`]; nothing in the crate mutates a shared instance.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::overlay::merge_type_overlays;
use crate::schema::{MemoryType, MonitoringConfig, MonitoringOverlay, TypeDefaults, TypeOverlay};

/// The bottom layer. Every field is concrete, so resolution always ends with
/// a fully populated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDefaults {
    pub strict_mode: bool,
    pub universal_rules: bool,
    pub monitoring: MonitoringConfig,
    /// One complete settings record per memory type.
    pub settings: TypeDefaults,
}

impl Default for ModuleDefaults {
    fn default() -> Self {
        Self {
            strict_mode: true,
            universal_rules: true,
            monitoring: MonitoringConfig::default(),
            settings: TypeDefaults::default(),
        }
    }
}

/// A partial layer of rule values.
///
/// Rules cannot change `version`, `mcpTypes`, or `universalRules`; those
/// belong to the project document alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleLayer {
    pub strict_mode: Option<bool>,
    pub monitoring: MonitoringOverlay,
    pub type_specific: BTreeMap<MemoryType, TypeOverlay>,
}

impl RuleLayer {
    /// Copy every value set in `higher` over this layer.
    pub fn merge_from(&mut self, higher: &RuleLayer) {
        if let Some(strict) = higher.strict_mode {
            self.strict_mode = Some(strict);
        }
        self.monitoring.merge_from(&higher.monitoring);
        merge_type_overlays(&mut self.type_specific, &higher.type_specific);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strict_mode.is_none() && self.monitoring.is_empty() && self.type_specific.is_empty()
    }
}

/// Everything below the project document, lowest layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDefaults {
    pub module: ModuleDefaults,
    /// Applied when the effective `universalRules` flag is true.
    pub universal: RuleLayer,
    /// Applied for each type listed in `mcpTypes`.
    pub type_rules: BTreeMap<MemoryType, RuleLayer>,
}

impl Default for ConfigDefaults {
    /// The rule set shipped with the crate.
    ///
    /// Universal rules keep overflow alerts on; the `token` rule turns on
    /// token-usage logging, since that strategy is pointless without it.
    fn default() -> Self {
        let universal = RuleLayer {
            monitoring: MonitoringOverlay {
                alert_on_overflow: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        let token_rule = RuleLayer {
            monitoring: MonitoringOverlay {
                log_token_usage: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        Self {
            module: ModuleDefaults::default(),
            universal,
            type_rules: BTreeMap::from([(MemoryType::Token, token_rule)]),
        }
    }
}

impl ConfigDefaults {
    /// Process-wide shared instance of [`ConfigDefaults::default`], built once.
    #[must_use]
    pub fn builtin() -> &'static ConfigDefaults {
        static BUILTIN: OnceLock<ConfigDefaults> = OnceLock::new();
        BUILTIN.get_or_init(ConfigDefaults::default)
    }

    /// Defaults with no rule layers, only the module defaults.
    #[must_use]
    pub fn module_only() -> Self {
        Self {
            module: ModuleDefaults::default(),
            universal: RuleLayer::default(),
            type_rules: BTreeMap::new(),
        }
    }

    /// Replace the rule layer for `memory_type`.
    #[must_use]
    pub fn with_type_rule(mut self, memory_type: MemoryType, rule: RuleLayer) -> Self {
        self.type_rules.insert(memory_type, rule);
        self
    }

    #[must_use]
    pub fn with_universal(mut self, rule: RuleLayer) -> Self {
        self.universal = rule;
        self
    }
}
