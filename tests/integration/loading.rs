//! Discovery and loading from disk.

use anyhow::Result;
use augment_mcp_config::config::{find_config, find_config_from, load_config};
use augment_mcp_config::constants::CONFIG_PATH_ENV;
use augment_mcp_config::core::{McpConfigError, user_friendly_error};
use augment_mcp_config::schema::MemoryType;
use augment_mcp_config::test_utils::{ConfigFixture, TestEnvironment};
use serial_test::serial;

/// Restores `AUGMENT_MCP_CONFIG` when dropped.
struct EnvGuard(Option<std::ffi::OsString>);

impl EnvGuard {
    fn set(value: &std::path::Path) -> Self {
        let previous = std::env::var_os(CONFIG_PATH_ENV);
        unsafe { std::env::set_var(CONFIG_PATH_ENV, value) };
        Self(previous)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.0 {
            Some(value) => unsafe { std::env::set_var(CONFIG_PATH_ENV, value) },
            None => unsafe { std::env::remove_var(CONFIG_PATH_ENV) },
        }
    }
}

#[test]
fn test_discovers_config_from_nested_directory() -> Result<()> {
    let env = TestEnvironment::with_config(&ConfigFixture::full())?;
    let nested = env.create_subdir("src/agents/deep")?;

    let path = find_config_from(&nested)?;
    assert_eq!(path, env.config_path());

    let validated = load_config(&path)?;
    assert_eq!(validated.config.primary_type(), Some(MemoryType::Hybrid));
    assert!(validated.config.monitoring.enabled);
    Ok(())
}

#[test]
fn test_missing_config_names_search_root() -> Result<()> {
    let env = TestEnvironment::new()?;
    let err = find_config_from(env.path()).unwrap_err();
    assert!(matches!(err, McpConfigError::ConfigNotFound { .. }));

    let ctx = user_friendly_error(err.into());
    assert!(ctx.suggestion.unwrap().contains(CONFIG_PATH_ENV));
    Ok(())
}

#[test]
#[serial]
fn test_env_var_overrides_discovery() -> Result<()> {
    let env = TestEnvironment::new()?;
    let explicit = env.path().join("custom-mcp.json");
    std::fs::write(&explicit, r#"{"version":"1.0","mcpTypes":["graph"]}"#)?;

    let _guard = EnvGuard::set(&explicit);
    let found = find_config()?;
    assert_eq!(found, explicit);
    assert_eq!(load_config(&found)?.config.primary_type(), Some(MemoryType::Graph));
    Ok(())
}

#[test]
#[serial]
fn test_env_var_pointing_nowhere() -> Result<()> {
    let env = TestEnvironment::new()?;
    let _guard = EnvGuard::set(&env.path().join("missing.json"));

    let err = find_config().unwrap_err();
    assert!(matches!(err, McpConfigError::ConfigPathNotFound { .. }));
    Ok(())
}

#[test]
fn test_invalid_file_reports_every_problem() -> Result<()> {
    let env = TestEnvironment::with_config(&ConfigFixture::invalid())?;
    let err = load_config(&env.config_path()).unwrap_err();

    let McpConfigError::Validation {
        path,
        source,
    } = &err
    else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(path, &env.config_path());
    assert!(source.find("version").is_some());
    assert!(source.find("mcpTypes[1]").is_some());
    assert!(err.to_string().contains("2 errors"));
    Ok(())
}

#[test]
fn test_malformed_file_is_schema_error_at_root() -> Result<()> {
    let env = TestEnvironment::with_config(&ConfigFixture::malformed())?;
    let err = load_config(&env.config_path()).unwrap_err();
    let McpConfigError::Validation {
        source,
        ..
    } = err
    else {
        panic!("expected validation error");
    };
    assert!(source.find("$").is_some());
    Ok(())
}

#[test]
fn test_lenient_file_loads_with_warnings() -> Result<()> {
    let env = TestEnvironment::with_config(&ConfigFixture::lenient_out_of_range())?;
    let validated = load_config(&env.config_path())?;
    assert!(!validated.config.strict_mode);
    assert_eq!(validated.report.warnings.len(), 1);
    Ok(())
}

#[test]
fn test_rewritten_config_replaces_old_one() -> Result<()> {
    let env = TestEnvironment::with_config(&ConfigFixture::minimal())?;
    env.write_config(r#"{"version":"1.0","mcpTypes":["compressed"]}"#)?;
    let validated = load_config(&env.config_path())?;
    assert_eq!(validated.config.mcp_types, vec![MemoryType::Compressed]);
    Ok(())
}
