//! Test utilities for augment-mcp-config
//!
//! Helpers for tests in this crate and in the integration suite: temporary
//! project directories, sample configuration documents, and one-time logging
//! setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use augment_mcp_config::config::load_config;
//! use augment_mcp_config::test_utils::{ConfigFixture, TestEnvironment};
//!
//! let env = TestEnvironment::with_config(&ConfigFixture::minimal()).unwrap();
//! let validated = load_config(&env.config_path()).unwrap();
//! assert!(validated.report.valid);
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::TestEnvironment;
pub use fixtures::ConfigFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=augment_mcp_config=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
