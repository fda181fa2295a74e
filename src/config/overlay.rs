//! The project layer: what one configuration document actually says.

use std::collections::BTreeMap;

use super::McpConfig;
use crate::schema::{MemoryType, MonitoringOverlay, TypeOverlay};

/// A parsed configuration document with every optional field left unset
/// unless the document wrote a valid value for it.
///
/// This is the highest-precedence layer fed to
/// [`resolve_precedence`](super::resolve_precedence). Fields that failed
/// validation are `None` here, so a lenient load falls back to the lower
/// layers for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverlay {
    pub version: Option<String>,
    /// Selected strategies in document order; the first is primary.
    pub mcp_types: Option<Vec<MemoryType>>,
    pub strict_mode: Option<bool>,
    pub universal_rules: Option<bool>,
    /// Per-type settings keyed by the `typeSpecificConfig` map key.
    pub type_specific: BTreeMap<MemoryType, TypeOverlay>,
    pub monitoring: MonitoringOverlay,
}

impl From<&McpConfig> for ConfigOverlay {
    /// An overlay that pins every field of an already resolved config.
    fn from(config: &McpConfig) -> Self {
        Self {
            version: Some(config.version.clone()),
            mcp_types: Some(config.mcp_types.clone()),
            strict_mode: Some(config.strict_mode),
            universal_rules: Some(config.universal_rules),
            type_specific: config
                .type_specific_config
                .iter()
                .map(|(ty, settings)| (*ty, TypeOverlay::from(settings)))
                .collect(),
            monitoring: MonitoringOverlay::from(&config.monitoring),
        }
    }
}

/// Merge `higher` into `target` key by key, so a layer that sets one field of
/// a type never erases the fields another layer set.
pub(crate) fn merge_type_overlays(
    target: &mut BTreeMap<MemoryType, TypeOverlay>,
    higher: &BTreeMap<MemoryType, TypeOverlay>,
) {
    for (ty, overlay) in higher {
        target
            .entry(*ty)
            .or_insert_with(|| TypeOverlay::empty(*ty))
            .merge_from(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{TokenOverlay, VectorOverlay};

    #[test]
    fn test_merge_type_overlays_is_per_key() {
        let mut target = BTreeMap::from([(
            MemoryType::Token,
            TypeOverlay::Token(TokenOverlay {
                max_context_window: Some(100_000),
                ..Default::default()
            }),
        )]);
        let higher = BTreeMap::from([
            (
                MemoryType::Token,
                TypeOverlay::Token(TokenOverlay {
                    compression_threshold: Some(0.6),
                    ..Default::default()
                }),
            ),
            (
                MemoryType::Vector,
                TypeOverlay::Vector(VectorOverlay {
                    top_k: Some(8),
                    ..Default::default()
                }),
            ),
        ]);

        merge_type_overlays(&mut target, &higher);

        let TypeOverlay::Token(token) = &target[&MemoryType::Token] else {
            panic!("expected token overlay");
        };
        assert_eq!(token.max_context_window, Some(100_000));
        assert_eq!(token.compression_threshold, Some(0.6));
        assert!(target.contains_key(&MemoryType::Vector));
    }
}
