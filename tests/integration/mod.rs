//! Integration test suite for augment-mcp-config
//!
//! End-to-end tests through the public API: documents on disk, discovery,
//! loading, and the resolved configuration consumers see.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **scenarios**: Acceptance scenarios for `validate`
//! - **precedence**: Layer ordering with custom rule sets
//! - **loading**: Discovery, `AUGMENT_MCP_CONFIG`, and file errors
//! - **round_trip**: Serialize, re-validate, compare

mod loading;
mod precedence;
mod round_trip;
mod scenarios;
