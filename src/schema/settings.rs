//! Per-type settings records for `typeSpecificConfig`.
//!
//! Each memory type owns one fixed-shape record. [`TypeSettings`] and
//! [`TypeOverlay`] wrap them as a tagged union keyed by [`MemoryType`]; the
//! map key in `typeSpecificConfig` always agrees with the variant.

use std::collections::BTreeMap;

use serde::Serialize;

use super::MemoryType;
use super::record::{named_enum, settings_record};

named_enum! {
    /// Where the `state` strategy keeps its checkpoints.
    StatePersistence {
        /// JSON files under `statePath`.
        File => "file",
        /// A SQLite database at `statePath`.
        Sqlite => "sqlite",
        /// Process memory only; nothing survives a restart.
        Memory => "memory",
    }
}

named_enum! {
    /// How the `compressed` strategy shrinks history.
    CompressionMethod {
        /// Rewrite older turns as prose summaries.
        Summarization => "summarization",
        /// Keep only extracted facts and decisions.
        Extraction => "extraction",
        /// Summaries of summaries, one level per age bucket.
        Hierarchical => "hierarchical",
    }
}

settings_record! {
    /// Settings for the `token` strategy.
    TokenSettings / TokenOverlay {
        /// Size of the model context window in tokens.
        max_context_window: u64 = 200_000,
        /// Fraction of the window at which compression kicks in, in `(0, 1)`.
        compression_threshold: f64 = 0.8,
        /// Tokens held back for the model's response.
        reserved_output_tokens: u64 = 4_096,
        /// Tokenizer used to count tokens.
        tokenizer: String = "cl100k_base".to_string(),
    }
}

settings_record! {
    /// Settings for the `state` strategy.
    StateSettings / StateOverlay {
        persistence: StatePersistence = StatePersistence::File,
        /// Project-relative location of persisted state.
        state_path: String = ".augment/state".to_string(),
        /// Turns between checkpoints.
        checkpoint_interval: u64 = 10,
        /// Checkpoints retained before the oldest is dropped.
        max_history: u64 = 100,
    }
}

settings_record! {
    /// Settings for the `vector` strategy.
    VectorSettings / VectorOverlay {
        embedding_model: String = "text-embedding-3-small".to_string(),
        /// Results returned per retrieval.
        top_k: u64 = 5,
        /// Minimum cosine similarity for a hit, in `[0, 1]`.
        similarity_threshold: f64 = 0.7,
        dimensions: u64 = 1_536,
    }
}

settings_record! {
    /// Settings for the `hybrid` strategy.
    ///
    /// `budget_allocation` maps each combined strategy to its share of the
    /// context budget. Shares are expected to sum to 1.0; a mismatch is
    /// reported as a conflict warning, never as an error.
    HybridSettings / HybridOverlay {
        memory_types: Vec<MemoryType> = vec![MemoryType::Token, MemoryType::Vector],
        budget_allocation: BTreeMap<MemoryType, f64> =
            BTreeMap::from([(MemoryType::Token, 0.5), (MemoryType::Vector, 0.5)]),
    }
}

settings_record! {
    /// Settings for the `graph` strategy.
    GraphSettings / GraphOverlay {
        /// Graph database backend name.
        database: String = "neo4j".to_string(),
        /// Maximum traversal depth per query.
        max_hops: u64 = 3,
        max_results: u64 = 50,
    }
}

settings_record! {
    /// Settings for the `compressed` strategy.
    CompressedSettings / CompressedOverlay {
        /// Target ratio of original to compressed size; always above 1.
        compression_ratio: f64 = 4.0,
        method: CompressionMethod = CompressionMethod::Summarization,
        /// Most recent turns kept verbatim.
        preserve_recent: u64 = 5,
    }
}

/// Fully resolved settings for one memory type.
///
/// Serializes without a tag; the enclosing `typeSpecificConfig` key already
/// names the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeSettings {
    Token(TokenSettings),
    State(StateSettings),
    Vector(VectorSettings),
    Hybrid(HybridSettings),
    Graph(GraphSettings),
    Compressed(CompressedSettings),
}

/// Partial settings for one memory type, as contributed by one layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeOverlay {
    Token(TokenOverlay),
    State(StateOverlay),
    Vector(VectorOverlay),
    Hybrid(HybridOverlay),
    Graph(GraphOverlay),
    Compressed(CompressedOverlay),
}

impl TypeSettings {
    /// The memory type this record configures.
    #[must_use]
    pub const fn memory_type(&self) -> MemoryType {
        match self {
            Self::Token(_) => MemoryType::Token,
            Self::State(_) => MemoryType::State,
            Self::Vector(_) => MemoryType::Vector,
            Self::Hybrid(_) => MemoryType::Hybrid,
            Self::Graph(_) => MemoryType::Graph,
            Self::Compressed(_) => MemoryType::Compressed,
        }
    }

    /// Overwrite the fields set in `overlay`.
    ///
    /// An overlay for a different memory type is ignored; callers key both by
    /// the same [`MemoryType`], so a mismatch never reaches this point.
    pub fn apply(&mut self, overlay: &TypeOverlay) {
        match (self, overlay) {
            (Self::Token(s), TypeOverlay::Token(o)) => s.apply(o),
            (Self::State(s), TypeOverlay::State(o)) => s.apply(o),
            (Self::Vector(s), TypeOverlay::Vector(o)) => s.apply(o),
            (Self::Hybrid(s), TypeOverlay::Hybrid(o)) => s.apply(o),
            (Self::Graph(s), TypeOverlay::Graph(o)) => s.apply(o),
            (Self::Compressed(s), TypeOverlay::Compressed(o)) => s.apply(o),
            (settings, overlay) => {
                tracing::debug!(
                    "Ignoring {} overlay for {} settings",
                    overlay.memory_type(),
                    settings.memory_type()
                );
            }
        }
    }
}

impl TypeOverlay {
    /// An overlay for `memory_type` with no field set.
    #[must_use]
    pub fn empty(memory_type: MemoryType) -> Self {
        match memory_type {
            MemoryType::Token => Self::Token(TokenOverlay::default()),
            MemoryType::State => Self::State(StateOverlay::default()),
            MemoryType::Vector => Self::Vector(VectorOverlay::default()),
            MemoryType::Hybrid => Self::Hybrid(HybridOverlay::default()),
            MemoryType::Graph => Self::Graph(GraphOverlay::default()),
            MemoryType::Compressed => Self::Compressed(CompressedOverlay::default()),
        }
    }

    /// The memory type this overlay configures.
    #[must_use]
    pub const fn memory_type(&self) -> MemoryType {
        match self {
            Self::Token(_) => MemoryType::Token,
            Self::State(_) => MemoryType::State,
            Self::Vector(_) => MemoryType::Vector,
            Self::Hybrid(_) => MemoryType::Hybrid,
            Self::Graph(_) => MemoryType::Graph,
            Self::Compressed(_) => MemoryType::Compressed,
        }
    }

    /// Copy every field set in `higher` over this overlay.
    pub fn merge_from(&mut self, higher: &TypeOverlay) {
        match (self, higher) {
            (Self::Token(s), Self::Token(o)) => s.merge_from(o),
            (Self::State(s), Self::State(o)) => s.merge_from(o),
            (Self::Vector(s), Self::Vector(o)) => s.merge_from(o),
            (Self::Hybrid(s), Self::Hybrid(o)) => s.merge_from(o),
            (Self::Graph(s), Self::Graph(o)) => s.merge_from(o),
            (Self::Compressed(s), Self::Compressed(o)) => s.merge_from(o),
            (lower, higher) => {
                tracing::debug!(
                    "Ignoring {} overlay merged onto {} overlay",
                    higher.memory_type(),
                    lower.memory_type()
                );
            }
        }
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Token(o) => o.is_empty(),
            Self::State(o) => o.is_empty(),
            Self::Vector(o) => o.is_empty(),
            Self::Hybrid(o) => o.is_empty(),
            Self::Graph(o) => o.is_empty(),
            Self::Compressed(o) => o.is_empty(),
        }
    }
}

impl From<&TypeSettings> for TypeOverlay {
    fn from(settings: &TypeSettings) -> Self {
        match settings {
            TypeSettings::Token(s) => Self::Token(s.into()),
            TypeSettings::State(s) => Self::State(s.into()),
            TypeSettings::Vector(s) => Self::Vector(s.into()),
            TypeSettings::Hybrid(s) => Self::Hybrid(s.into()),
            TypeSettings::Graph(s) => Self::Graph(s.into()),
            TypeSettings::Compressed(s) => Self::Compressed(s.into()),
        }
    }
}

/// Module defaults: one complete record per memory type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDefaults {
    pub token: TokenSettings,
    pub state: StateSettings,
    pub vector: VectorSettings,
    pub hybrid: HybridSettings,
    pub graph: GraphSettings,
    pub compressed: CompressedSettings,
}

impl TypeDefaults {
    /// A fresh copy of the default record for `memory_type`.
    #[must_use]
    pub fn settings_for(&self, memory_type: MemoryType) -> TypeSettings {
        match memory_type {
            MemoryType::Token => TypeSettings::Token(self.token.clone()),
            MemoryType::State => TypeSettings::State(self.state.clone()),
            MemoryType::Vector => TypeSettings::Vector(self.vector.clone()),
            MemoryType::Hybrid => TypeSettings::Hybrid(self.hybrid.clone()),
            MemoryType::Graph => TypeSettings::Graph(self.graph.clone()),
            MemoryType::Compressed => TypeSettings::Compressed(self.compressed.clone()),
        }
    }
}
