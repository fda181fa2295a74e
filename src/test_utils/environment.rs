//! Test environment setup and management
//!
//! A temporary project directory, optionally with a configuration file, for
//! discovery and loading tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::ConfigFixture;
use crate::constants::{CONFIG_DIR, CONFIG_FILE_NAME};

/// Test environment helper that sets up a temporary project
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
}

impl TestEnvironment {
    /// Create an empty project directory
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            temp_dir,
            project_dir,
        })
    }

    /// Create a project with `fixture` written to `.augment/mcp-config.json`
    pub fn with_config(fixture: &ConfigFixture) -> Result<Self> {
        let env = Self::new()?;
        fixture.write_to(&env.project_dir)?;
        Ok(env)
    }

    /// Path the project's configuration lives at, whether or not it exists
    pub fn config_path(&self) -> PathBuf {
        self.project_dir.join(CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    /// Replace the configuration with raw text
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Create a nested directory under the project and return its path
    pub fn create_subdir(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = self.project_dir.join(relative);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn path(&self) -> &Path {
        &self.project_dir
    }
}
