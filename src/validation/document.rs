//! Top-level document structure: `version`, `mcpTypes`, flags,
//! `typeSpecificConfig`, and `monitoring`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::diagnostics::Diagnostics;
use super::reader::{ObjectReader, child_path, index_path, json_type};
use super::type_specific::read_type_overlay;
use crate::config::ConfigOverlay;
use crate::constants::CONFIG_VERSION;
use crate::schema::{MemoryType, MonitoringOverlay, NamedVariants, TypeOverlay};

const TOP_LEVEL_FIELDS: &[&str] = &[
    "$schema",
    "version",
    "mcpTypes",
    "strictMode",
    "universalRules",
    "typeSpecificConfig",
    "monitoring",
];

const MONITORING_FIELDS: &[&str] = &["enabled", "logTokenUsage", "alertOnOverflow", "logLevel"];

/// Read the root object into an overlay, recording every problem found.
pub(super) fn read_document(root: &Map<String, Value>, diags: &mut Diagnostics) -> ConfigOverlay {
    let mut r = ObjectReader::new(root, "", TOP_LEVEL_FIELDS, diags);

    let version = read_version(&mut r);
    let mcp_types = read_mcp_types(&mut r);
    let strict_mode = r.bool("strictMode");
    let universal_rules = r.bool("universalRules");

    let type_specific = r
        .object("typeSpecificConfig")
        .map(|entries| read_type_specific(entries, r.diags()))
        .unwrap_or_default();

    let monitoring = r
        .object("monitoring")
        .map(|block| {
            let mut m = ObjectReader::new(block, "monitoring", MONITORING_FIELDS, r.diags());
            MonitoringOverlay {
                enabled: m.bool("enabled"),
                log_token_usage: m.bool("logTokenUsage"),
                alert_on_overflow: m.bool("alertOnOverflow"),
                log_level: m.named("logLevel"),
            }
        })
        .unwrap_or_default();

    ConfigOverlay {
        version,
        mcp_types,
        strict_mode,
        universal_rules,
        type_specific,
        monitoring,
    }
}

fn read_version(r: &mut ObjectReader<'_, '_>) -> Option<String> {
    let Some(value) = r.raw("version") else {
        r.diags().missing("version", "string");
        return None;
    };
    match value.as_str() {
        Some(CONFIG_VERSION) => Some(CONFIG_VERSION.to_string()),
        Some(_) => {
            r.diags()
                .schema("version", format!("\"{CONFIG_VERSION}\""), value.to_string());
            None
        }
        None => {
            r.diags().schema("version", "string", json_type(value));
            None
        }
    }
}

fn read_mcp_types(r: &mut ObjectReader<'_, '_>) -> Option<Vec<MemoryType>> {
    if r.raw("mcpTypes").is_none() {
        r.diags().missing("mcpTypes", "array of memory types");
        return None;
    }
    let items = r.array("mcpTypes")?;
    if items.is_empty() {
        r.diags()
            .schema("mcpTypes", "non-empty array of memory types", "empty array");
        return None;
    }

    let mut types = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let path = index_path("mcpTypes", index);
        match item.as_str() {
            Some(name) => match MemoryType::from_name(name) {
                Some(ty) => types.push(ty),
                None => r
                    .diags()
                    .schema(path, MemoryType::expected(), item.to_string()),
            },
            None => r.diags().schema(path, "string", json_type(item)),
        }
    }

    // Partially valid lists are not kept; the schema errors above are fatal.
    (types.len() == items.len()).then_some(types)
}

fn read_type_specific(
    entries: &Map<String, Value>,
    diags: &mut Diagnostics,
) -> BTreeMap<MemoryType, TypeOverlay> {
    let mut overlays = BTreeMap::new();
    for (name, settings) in entries {
        let path = child_path("typeSpecificConfig", name);
        let Some(ty) = MemoryType::from_name(name) else {
            diags.schema(path, MemoryType::expected(), format!("\"{name}\""));
            continue;
        };
        let Some(object) = settings.as_object() else {
            diags.schema(path, "object", json_type(settings));
            continue;
        };
        overlays.insert(ty, read_type_overlay(ty, object, &path, diags));
    }
    overlays
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogLevel;
    use crate::validation::{Diagnostic, DiagnosticKind};
    use serde_json::json;

    fn read(value: Value) -> (ConfigOverlay, Vec<Diagnostic>) {
        let mut diags = Diagnostics::new();
        let overlay = read_document(value.as_object().unwrap(), &mut diags);
        (overlay, diags.into_vec())
    }

    #[test]
    fn test_minimal_document() {
        let (overlay, diags) = read(json!({"version": "1.0", "mcpTypes": ["token"]}));
        assert!(diags.is_empty());
        assert_eq!(overlay.version.as_deref(), Some("1.0"));
        assert_eq!(overlay.mcp_types, Some(vec![MemoryType::Token]));
        assert_eq!(overlay.strict_mode, None);
        assert!(overlay.type_specific.is_empty());
        assert!(overlay.monitoring.is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_both_reported() {
        let (_, diags) = read(json!({}));
        let paths: Vec<&str> = diags.iter().map(Diagnostic::path).collect();
        assert_eq!(paths, vec!["version", "mcpTypes"]);
        assert!(diags.iter().all(|d| d.kind() == DiagnosticKind::Schema));
    }

    #[test]
    fn test_wrong_version_value() {
        let (_, diags) = read(json!({"version": "2.0", "mcpTypes": ["token"]}));
        assert!(matches!(
            &diags[0],
            Diagnostic::SchemaError { path, expected, actual }
                if path == "version" && expected == "\"1.0\"" && actual == "\"2.0\""
        ));
    }

    #[test]
    fn test_numeric_version_is_type_error() {
        let (_, diags) = read(json!({"version": 1.0, "mcpTypes": ["token"]}));
        assert!(matches!(
            &diags[0],
            Diagnostic::SchemaError { expected, actual, .. } if expected == "string" && actual == "number"
        ));
    }

    #[test]
    fn test_every_bad_mcp_type_is_reported() {
        let (overlay, diags) = read(json!({"version": "1.0", "mcpTypes": ["token", "bogus", 7]}));
        assert_eq!(overlay.mcp_types, None);
        let paths: Vec<&str> = diags.iter().map(Diagnostic::path).collect();
        assert_eq!(paths, vec!["mcpTypes[1]", "mcpTypes[2]"]);
    }

    #[test]
    fn test_empty_mcp_types_is_schema_error() {
        let (_, diags) = read(json!({"version": "1.0", "mcpTypes": []}));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind(), DiagnosticKind::Schema);
        assert_eq!(diags[0].path(), "mcpTypes");
    }

    #[test]
    fn test_unknown_top_level_field_but_schema_key_allowed() {
        let (_, diags) = read(json!({
            "$schema": "https://example.com/mcp-config.schema.json",
            "version": "1.0",
            "mcpTypes": ["token"],
            "strict": true
        }));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path(), "strict");
    }

    #[test]
    fn test_unknown_type_specific_key() {
        let (overlay, diags) = read(json!({
            "version": "1.0",
            "mcpTypes": ["token"],
            "typeSpecificConfig": {"episodic": {}, "token": "big"}
        }));
        assert!(overlay.type_specific.is_empty());
        let paths: Vec<&str> = diags.iter().map(Diagnostic::path).collect();
        assert_eq!(
            paths,
            vec!["typeSpecificConfig.episodic", "typeSpecificConfig.token"]
        );
    }

    #[test]
    fn test_monitoring_block() {
        let (overlay, diags) = read(json!({
            "version": "1.0",
            "mcpTypes": ["token"],
            "monitoring": {"enabled": true, "logLevel": "debug", "logTokenUsage": "yes"}
        }));
        assert_eq!(overlay.monitoring.enabled, Some(true));
        assert_eq!(overlay.monitoring.log_level, Some(LogLevel::Debug));
        assert_eq!(overlay.monitoring.log_token_usage, None);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path(), "monitoring.logTokenUsage");
    }
}
