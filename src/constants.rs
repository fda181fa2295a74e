//! Constants shared across the crate.
//!
//! File locations, environment variables, and the numeric bounds the validator
//! enforces. Bounds live here rather than next to each check so the documented
//! limits of the file format can be read in one place.

/// The only supported value of the `version` field.
pub const CONFIG_VERSION: &str = "1.0";

/// Directory holding the configuration, relative to the project root.
pub const CONFIG_DIR: &str = ".augment";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE_NAME: &str = "mcp-config.json";

/// Environment variable naming an explicit configuration file path.
///
/// When set, directory discovery is skipped entirely.
pub const CONFIG_PATH_ENV: &str = "AUGMENT_MCP_CONFIG";

/// Largest configuration file the loader will read (1 MiB).
///
/// Real configurations are a few kilobytes; anything this large is almost
/// certainly the wrong file.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Allowed distance of the hybrid budget sum from 1.0.
pub const BUDGET_SUM_TOLERANCE: f64 = 0.01;

/// Upper bound for `token.maxContextWindow`.
pub const MAX_CONTEXT_WINDOW: u64 = 10_000_000;

/// Upper bound for `token.reservedOutputTokens`.
pub const MAX_RESERVED_OUTPUT_TOKENS: u64 = 1_000_000;

/// Upper bound for `graph.maxHops`.
pub const MAX_GRAPH_HOPS: u64 = 10;

/// Upper bound for `compressed.compressionRatio`.
pub const MAX_COMPRESSION_RATIO: f64 = 100.0;
