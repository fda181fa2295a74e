//! Schema types for `.augment/mcp-config.json`.
//!
//! The configuration selects one or more memory strategies ("MCP types") and
//! carries a fixed-shape settings record for each. This module defines the
//! closed vocabulary of the document:
//!
//! - [`MemoryType`] - the six recognized strategies
//! - [`TypeSettings`] / [`TypeOverlay`] - the per-type settings as a tagged union,
//!   in fully resolved and partial form
//! - [`MonitoringConfig`] - logging controls for the consuming runtime
//!
//! Every record exists in two shapes. The full shape (`TokenSettings`, ...) is
//! what callers read after validation: no field is ever missing. The overlay
//! shape (`TokenOverlay`, ...) is what a single configuration layer contributes
//! and is the unit of precedence resolution.
//!
//! # Example
//!
//! ```rust
//! use augment_mcp_config::schema::{MemoryType, NamedVariants};
//!
//! assert_eq!(MemoryType::from_name("vector"), Some(MemoryType::Vector));
//! assert_eq!(MemoryType::from_name("invalid"), None);
//! assert_eq!(MemoryType::Graph.to_string(), "graph");
//! ```

mod monitoring;
pub(crate) mod record;
mod settings;

pub use monitoring::{LogLevel, MonitoringConfig, MonitoringOverlay};
pub use settings::{
    CompressedOverlay, CompressedSettings, CompressionMethod, GraphOverlay, GraphSettings,
    HybridOverlay, HybridSettings, StateOverlay, StatePersistence, StateSettings, TokenOverlay,
    TokenSettings, TypeDefaults, TypeOverlay, TypeSettings, VectorOverlay, VectorSettings,
};

use record::named_enum;

/// A closed set of string values with a fixed spelling in the file format.
///
/// Implemented by every enum that appears as a JSON string in the
/// configuration, so the validator can report the allowed values when a
/// document uses an unknown one.
pub trait NamedVariants: Sized + Copy {
    /// Spellings of every variant, in declaration order.
    const NAMES: &'static [&'static str];

    /// Parse the exact file-format spelling.
    fn from_name(name: &str) -> Option<Self>;

    /// The file-format spelling of this variant.
    fn name(&self) -> &'static str;

    /// Human-readable list of allowed spellings, e.g. `one of: token, state`.
    #[must_use]
    fn expected() -> String {
        format!("one of: {}", Self::NAMES.join(", "))
    }
}

named_enum! {
    /// A memory strategy the agent runtime can use to manage context.
    ///
    /// The order of `mcpTypes` in the document matters: the first entry is the
    /// primary type and wins when strategies conflict.
    MemoryType {
        /// Token-budget management of the context window.
        Token => "token",
        /// Persistent conversational state with checkpoints.
        State => "state",
        /// Embedding-based retrieval.
        Vector => "vector",
        /// A weighted combination of other strategies.
        Hybrid => "hybrid",
        /// Knowledge-graph traversal.
        Graph => "graph",
        /// Summarised or compressed history.
        Compressed => "compressed",
    }
}

impl MemoryType {
    /// All memory types in declaration order.
    pub const ALL: [MemoryType; 6] = [
        MemoryType::Token,
        MemoryType::State,
        MemoryType::Vector,
        MemoryType::Hybrid,
        MemoryType::Graph,
        MemoryType::Compressed,
    ];
}
