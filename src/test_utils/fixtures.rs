//! Test fixtures for sample `mcp-config.json` documents

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR, CONFIG_FILE_NAME};

/// Test fixture for creating sample `.augment/mcp-config.json` files
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
    pub name: String,
}

impl ConfigFixture {
    /// Only the two required fields
    pub fn minimal() -> Self {
        Self::from_json("minimal", serde_json::json!({"version": "1.0", "mcpTypes": ["token"]}))
    }

    /// Every top-level field and a settings block for each listed type
    pub fn full() -> Self {
        Self::from_json(
            "full",
            serde_json::json!({
                "version": "1.0",
                "mcpTypes": ["hybrid", "token", "vector"],
                "strictMode": true,
                "universalRules": true,
                "typeSpecificConfig": {
                    "hybrid": {
                        "memoryTypes": ["token", "vector"],
                        "budgetAllocation": {"token": 0.4, "vector": 0.6}
                    },
                    "token": {"maxContextWindow": 128000, "compressionThreshold": 0.7},
                    "vector": {"topK": 10, "similarityThreshold": 0.75}
                },
                "monitoring": {"enabled": true, "logTokenUsage": true, "logLevel": "debug"}
            }),
        )
    }

    /// Range errors only, with strict mode off
    pub fn lenient_out_of_range() -> Self {
        Self::from_json(
            "lenient_out_of_range",
            serde_json::json!({
                "version": "1.0",
                "mcpTypes": ["vector"],
                "strictMode": false,
                "typeSpecificConfig": {"vector": {"topK": -1}}
            }),
        )
    }

    /// Missing `version` and an unknown memory type
    pub fn invalid() -> Self {
        Self::from_json("invalid", serde_json::json!({"mcpTypes": ["token", "episodic"]}))
    }

    pub fn malformed() -> Self {
        Self {
            name: "malformed".to_string(),
            content: r#"{"version": "1.0", "mcpTypes": ["token""#.to_string(),
        }
    }

    /// Any JSON value, pretty-printed
    pub fn from_json(name: &str, value: serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            content: serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
        }
    }

    /// Write to `<dir>/.augment/mcp-config.json`, creating `.augment`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, &self.content)
            .with_context(|| format!("Failed to write fixture '{}'", self.name))?;
        Ok(config_path)
    }
}
