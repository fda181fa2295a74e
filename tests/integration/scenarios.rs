//! Acceptance scenarios for document validation.

use augment_mcp_config::schema::{MemoryType, TypeSettings};
use augment_mcp_config::validation::{Diagnostic, DiagnosticKind, validate};
use serde_json::json;

#[test]
fn test_minimal_document_is_valid_and_strict() {
    let validated = validate(r#"{"version":"1.0","mcpTypes":["token"]}"#).unwrap();

    assert!(validated.config.strict_mode);
    let json = serde_json::to_value(&validated.config).unwrap();
    assert_eq!(json["typeSpecificConfig"], json!({}));
    assert_eq!(json["mcpTypes"], json!(["token"]));
}

#[test]
fn test_invalid_mcp_type_is_schema_error() {
    let err = validate(r#"{"version":"1.0","mcpTypes":["invalid"]}"#).unwrap_err();

    let diagnostic = err.find("mcpTypes[0]").expect("diagnostic for mcpTypes[0]");
    assert_eq!(diagnostic.kind(), DiagnosticKind::Schema);
    assert!(diagnostic.to_string().contains("\"invalid\""));
}

#[test]
fn test_missing_version_is_schema_error() {
    let err = validate(r#"{"mcpTypes":["token"]}"#).unwrap_err();
    assert!(matches!(
        err.find("version"),
        Some(Diagnostic::SchemaError { actual, .. }) if actual == "missing required field"
    ));
}

#[test]
fn test_budget_overshoot_warns_without_failing() {
    let raw = json!({
        "version": "1.0",
        "mcpTypes": ["hybrid"],
        "typeSpecificConfig": {
            "hybrid": {"budgetAllocation": {"token": 0.5, "vector": 0.6}}
        }
    })
    .to_string();

    let validated = validate(&raw).unwrap();
    assert!(validated.report.valid);
    assert!(validated.report.errors.is_empty());
    assert_eq!(validated.report.warnings.len(), 1);
    assert_eq!(validated.report.warnings[0].kind(), DiagnosticKind::Conflict);
}

#[test]
fn test_every_unknown_type_is_reported() {
    let raw = json!({"version": "1.0", "mcpTypes": ["token", "semantic", "episodic"]}).to_string();
    let err = validate(&raw).unwrap_err();
    assert!(err.find("mcpTypes[1]").is_some());
    assert!(err.find("mcpTypes[2]").is_some());
    assert_eq!(err.errors().count(), 2);
}

#[test]
fn test_partial_type_settings_keep_other_defaults() {
    let raw = json!({
        "version": "1.0",
        "mcpTypes": ["token"],
        "typeSpecificConfig": {"token": {"compressionThreshold": 0.6}}
    })
    .to_string();

    let validated = validate(&raw).unwrap();
    let Some(TypeSettings::Token(token)) = validated.config.settings_for(MemoryType::Token) else {
        panic!("expected token settings");
    };
    assert_eq!(token.compression_threshold, 0.6);
    assert_eq!(token.max_context_window, 200_000);
    assert_eq!(token.tokenizer, "cl100k_base");
}

#[test]
fn test_report_renders_and_serializes() {
    let raw = json!({
        "version": "1.0",
        "mcpTypes": ["graph", "graph"],
        "strictMode": false,
        "typeSpecificConfig": {"graph": {"maxHops": 50}}
    })
    .to_string();

    let validated = validate(&raw).unwrap();
    assert_eq!(validated.report.warnings.len(), 2);

    colored::control::set_override(false);
    let text = validated.report.render_text();
    assert!(text.contains("⚠ mcpTypes[1]"));
    assert!(text.contains("⚠ typeSpecificConfig.graph.maxHops"));

    let json: serde_json::Value =
        serde_json::from_str(&validated.report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["strict_mode"], false);
}
