//! Resolved configs written back to JSON validate to the same value.

use augment_mcp_config::config::{ConfigDefaults, ConfigOverlay, resolve_precedence};
use augment_mcp_config::test_utils::ConfigFixture;
use augment_mcp_config::validate;
use serde_json::json;

#[test]
fn test_full_fixture_round_trips() {
    let original = validate(&ConfigFixture::full().content).unwrap();
    let written = original.config.to_json_pretty().unwrap();
    let reread = validate(&written).unwrap();

    assert_eq!(reread.config, original.config);
}

#[test]
fn test_written_config_has_every_field() {
    let validated = validate(
        &json!({"version": "1.0", "mcpTypes": ["state"], "typeSpecificConfig": {"state": {}}})
            .to_string(),
    )
    .unwrap();
    let json = serde_json::to_value(&validated.config).unwrap();

    assert_eq!(
        json["typeSpecificConfig"]["state"],
        json!({
            "persistence": "file",
            "statePath": ".augment/state",
            "checkpointInterval": 10,
            "maxHistory": 100
        })
    );
    assert_eq!(
        json["monitoring"],
        json!({
            "enabled": false,
            "logTokenUsage": false,
            "alertOnOverflow": true,
            "logLevel": "info"
        })
    );
    assert_eq!(json["strictMode"], true);
    assert_eq!(json["universalRules"], true);
}

#[test]
fn test_every_memory_type_round_trips() {
    let raw = json!({
        "version": "1.0",
        "mcpTypes": ["token", "state", "vector", "hybrid", "graph", "compressed"],
        "typeSpecificConfig": {
            "token": {}, "state": {}, "vector": {}, "hybrid": {}, "graph": {}, "compressed": {}
        }
    })
    .to_string();

    let first = validate(&raw).unwrap();
    assert_eq!(first.config.type_specific_config.len(), 6);

    let second = validate(&first.config.to_json_pretty().unwrap()).unwrap();
    assert_eq!(first.config, second.config);

    let resolved_again = resolve_precedence(
        &ConfigOverlay::from(&second.config),
        ConfigDefaults::builtin(),
    );
    assert_eq!(resolved_again, second.config);
}
