//! Precedence across module defaults, universal rules, type rules, and the project.

use std::collections::BTreeMap;

use augment_mcp_config::config::{ConfigDefaults, ConfigOverlay, RuleLayer, resolve_precedence};
use augment_mcp_config::schema::{
    LogLevel, MemoryType, MonitoringOverlay, TypeOverlay, TypeSettings, VectorOverlay,
};
use augment_mcp_config::validation::Validator;

fn vector_rule(top_k: u64, level: LogLevel) -> RuleLayer {
    RuleLayer {
        monitoring: MonitoringOverlay {
            log_level: Some(level),
            ..Default::default()
        },
        type_specific: BTreeMap::from([(
            MemoryType::Vector,
            TypeOverlay::Vector(VectorOverlay {
                top_k: Some(top_k),
                ..Default::default()
            }),
        )]),
        ..Default::default()
    }
}

fn top_k(settings: Option<&TypeSettings>) -> u64 {
    match settings {
        Some(TypeSettings::Vector(vector)) => vector.top_k,
        other => panic!("expected vector settings, got {other:?}"),
    }
}

fn defaults() -> ConfigDefaults {
    ConfigDefaults::module_only()
        .with_universal(vector_rule(7, LogLevel::Warn))
        .with_type_rule(MemoryType::Vector, vector_rule(9, LogLevel::Debug))
}

#[test]
fn test_type_rule_beats_universal_rule() {
    let defaults = defaults();
    let validated = Validator::new(&defaults)
        .validate(r#"{"version":"1.0","mcpTypes":["vector"]}"#)
        .unwrap();

    assert_eq!(top_k(validated.config.settings_for(MemoryType::Vector)), 9);
    assert_eq!(validated.config.monitoring.log_level, LogLevel::Debug);
}

#[test]
fn test_project_beats_type_rule() {
    let defaults = defaults();
    let validated = Validator::new(&defaults)
        .validate(
            r#"{"version":"1.0","mcpTypes":["vector"],"typeSpecificConfig":{"vector":{"topK":3}},"monitoring":{"logLevel":"error"}}"#,
        )
        .unwrap();

    assert_eq!(top_k(validated.config.settings_for(MemoryType::Vector)), 3);
    assert_eq!(validated.config.monitoring.log_level, LogLevel::Error);
}

#[test]
fn test_universal_rules_can_be_switched_off() {
    let defaults = ConfigDefaults::module_only().with_universal(vector_rule(7, LogLevel::Warn));
    let validated = Validator::new(&defaults)
        .validate(r#"{"version":"1.0","mcpTypes":["vector"],"universalRules":false}"#)
        .unwrap();

    assert!(validated.config.settings_for(MemoryType::Vector).is_none());
    assert_eq!(validated.config.monitoring.log_level, LogLevel::Info);
}

#[test]
fn test_primary_type_rule_applied_last() {
    let defaults = ConfigDefaults::module_only()
        .with_type_rule(MemoryType::Vector, vector_rule(9, LogLevel::Debug))
        .with_type_rule(MemoryType::Graph, vector_rule(4, LogLevel::Trace));

    let overlay = ConfigOverlay {
        version: Some("1.0".to_string()),
        mcp_types: Some(vec![MemoryType::Graph, MemoryType::Vector]),
        ..Default::default()
    };
    let config = resolve_precedence(&overlay, &defaults);

    assert_eq!(top_k(config.settings_for(MemoryType::Vector)), 4);
    assert_eq!(config.monitoring.log_level, LogLevel::Trace);
}

#[test]
fn test_builtin_token_rule_enables_usage_logging() {
    let validated =
        augment_mcp_config::validate(r#"{"version":"1.0","mcpTypes":["vector","token"]}"#).unwrap();
    assert!(validated.config.monitoring.log_token_usage);

    let validated = augment_mcp_config::validate(
        r#"{"version":"1.0","mcpTypes":["token"],"monitoring":{"logTokenUsage":false}}"#,
    )
    .unwrap();
    assert!(!validated.config.monitoring.log_token_usage);
}
