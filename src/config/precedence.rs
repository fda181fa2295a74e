//! Four-layer precedence resolution.
//!
//! From lowest to highest:
//!
//! 1. Module defaults ([`ModuleDefaults`](super::ModuleDefaults))
//! 2. Universal rules, when the effective `universalRules` flag is true
//! 3. Type-specific rules for each listed type, applied from the last listed
//!    type to the first so the primary type wins
//! 4. The project document ([`ConfigOverlay`])
//!
//! Scalars are last-writer-wins. `typeSpecificConfig` merges per type and then
//! per field, so a project that sets only `token.compressionThreshold` keeps
//! every other `token` default.

use super::defaults::{ConfigDefaults, RuleLayer};
use super::overlay::{ConfigOverlay, merge_type_overlays};
use super::{EffectiveConfig, McpConfig};
use crate::constants::CONFIG_VERSION;

/// Resolve a project overlay against the lower layers.
///
/// The result has every field populated. Resolving the overlay of an
/// already resolved config (`ConfigOverlay::from(&config)`) returns the same
/// config.
#[must_use]
pub fn resolve_precedence(project: &ConfigOverlay, defaults: &ConfigDefaults) -> EffectiveConfig {
    let module = &defaults.module;
    let mcp_types = project.mcp_types.clone().unwrap_or_default();
    let universal_rules = project.universal_rules.unwrap_or(module.universal_rules);

    let mut combined = RuleLayer::default();
    if universal_rules {
        combined.merge_from(&defaults.universal);
    }
    for ty in mcp_types.iter().rev() {
        if let Some(rule) = defaults.type_rules.get(ty) {
            tracing::trace!("Applying {ty} rule layer");
            combined.merge_from(rule);
        }
    }
    // Rules only ever configure types the project selected.
    combined.type_specific.retain(|ty, _| mcp_types.contains(ty));

    if let Some(strict) = project.strict_mode {
        combined.strict_mode = Some(strict);
    }
    combined.monitoring.merge_from(&project.monitoring);
    merge_type_overlays(&mut combined.type_specific, &project.type_specific);

    let mut monitoring = module.monitoring.clone();
    monitoring.apply(&combined.monitoring);

    let type_specific_config = combined
        .type_specific
        .iter()
        .map(|(ty, overlay)| {
            let mut settings = module.settings.settings_for(*ty);
            settings.apply(overlay);
            (*ty, settings)
        })
        .collect();

    McpConfig {
        version: project
            .version
            .clone()
            .unwrap_or_else(|| CONFIG_VERSION.to_string()),
        mcp_types,
        strict_mode: combined.strict_mode.unwrap_or(module.strict_mode),
        universal_rules,
        type_specific_config,
        monitoring,
    }
}
