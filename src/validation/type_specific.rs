//! Readers for the six `typeSpecificConfig` records.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::diagnostics::Diagnostics;
use super::reader::{IntBound, NumberBound, ObjectReader, child_path, index_path, json_type};
use crate::constants::{
    MAX_COMPRESSION_RATIO, MAX_CONTEXT_WINDOW, MAX_GRAPH_HOPS, MAX_RESERVED_OUTPUT_TOKENS,
};
use crate::schema::{
    CompressedOverlay, GraphOverlay, HybridOverlay, MemoryType, NamedVariants, StateOverlay,
    TokenOverlay, TypeOverlay, VectorOverlay,
};

/// Read the settings object for `memory_type` located at `path`.
pub(super) fn read_type_overlay(
    memory_type: MemoryType,
    object: &Map<String, Value>,
    path: &str,
    diags: &mut Diagnostics,
) -> TypeOverlay {
    match memory_type {
        MemoryType::Token => TypeOverlay::Token(read_token(object, path, diags)),
        MemoryType::State => TypeOverlay::State(read_state(object, path, diags)),
        MemoryType::Vector => TypeOverlay::Vector(read_vector(object, path, diags)),
        MemoryType::Hybrid => TypeOverlay::Hybrid(read_hybrid(object, path, diags)),
        MemoryType::Graph => TypeOverlay::Graph(read_graph(object, path, diags)),
        MemoryType::Compressed => TypeOverlay::Compressed(read_compressed(object, path, diags)),
    }
}

fn read_token(object: &Map<String, Value>, path: &str, diags: &mut Diagnostics) -> TokenOverlay {
    let mut r = ObjectReader::new(
        object,
        path,
        &[
            "maxContextWindow",
            "compressionThreshold",
            "reservedOutputTokens",
            "tokenizer",
        ],
        diags,
    );
    TokenOverlay {
        max_context_window: r.integer("maxContextWindow", IntBound::between(1, MAX_CONTEXT_WINDOW)),
        compression_threshold: r.number("compressionThreshold", NumberBound::Open(0.0, 1.0)),
        reserved_output_tokens: r.integer(
            "reservedOutputTokens",
            IntBound::between(0, MAX_RESERVED_OUTPUT_TOKENS),
        ),
        tokenizer: r.string("tokenizer"),
    }
}

fn read_state(object: &Map<String, Value>, path: &str, diags: &mut Diagnostics) -> StateOverlay {
    let mut r = ObjectReader::new(
        object,
        path,
        &["persistence", "statePath", "checkpointInterval", "maxHistory"],
        diags,
    );
    StateOverlay {
        persistence: r.named("persistence"),
        state_path: r.string("statePath"),
        checkpoint_interval: r.integer("checkpointInterval", IntBound::at_least(1)),
        max_history: r.integer("maxHistory", IntBound::at_least(1)),
    }
}

fn read_vector(object: &Map<String, Value>, path: &str, diags: &mut Diagnostics) -> VectorOverlay {
    let mut r = ObjectReader::new(
        object,
        path,
        &["embeddingModel", "topK", "similarityThreshold", "dimensions"],
        diags,
    );
    VectorOverlay {
        embedding_model: r.string("embeddingModel"),
        top_k: r.integer("topK", IntBound::at_least(1)),
        similarity_threshold: r.number("similarityThreshold", NumberBound::Closed(0.0, 1.0)),
        dimensions: r.integer("dimensions", IntBound::at_least(1)),
    }
}

fn read_hybrid(object: &Map<String, Value>, path: &str, diags: &mut Diagnostics) -> HybridOverlay {
    let mut r = ObjectReader::new(object, path, &["memoryTypes", "budgetAllocation"], diags);

    let memory_types = r.array("memoryTypes").and_then(|items| {
        let list_path = r.field_path("memoryTypes");
        read_component_types(items, &list_path, r.diags())
    });

    let budget_allocation = r.object("budgetAllocation").and_then(|shares| {
        let budget_path = r.field_path("budgetAllocation");
        read_budget(shares, &budget_path, r.diags())
    });

    HybridOverlay {
        memory_types,
        budget_allocation,
    }
}

/// Component strategies of a hybrid: non-empty, known, and never `hybrid` itself.
fn read_component_types(
    items: &[Value],
    path: &str,
    diags: &mut Diagnostics,
) -> Option<Vec<MemoryType>> {
    if items.is_empty() {
        diags.range(path, "[]", "at least one memory type");
        return None;
    }

    let mut types = Vec::with_capacity(items.len());
    let mut clean = true;
    for (index, item) in items.iter().enumerate() {
        let item_path = index_path(path, index);
        let Some(name) = item.as_str() else {
            diags.schema(item_path, "string", json_type(item));
            clean = false;
            continue;
        };
        match MemoryType::from_name(name) {
            Some(MemoryType::Hybrid) => {
                diags.schema(item_path, "a non-hybrid memory type", item.to_string());
                clean = false;
            }
            Some(ty) => types.push(ty),
            None => {
                diags.schema(item_path, MemoryType::expected(), item.to_string());
                clean = false;
            }
        }
    }

    clean.then_some(types)
}

/// Budget shares keyed by memory type. Any rejected share drops the whole map.
fn read_budget(
    shares: &Map<String, Value>,
    path: &str,
    diags: &mut Diagnostics,
) -> Option<BTreeMap<MemoryType, f64>> {
    let mut budget = BTreeMap::new();
    let mut clean = true;
    for (name, share) in shares {
        let share_path = child_path(path, name);
        let Some(ty) = MemoryType::from_name(name) else {
            diags.schema(share_path, MemoryType::expected(), format!("\"{name}\""));
            clean = false;
            continue;
        };
        let Some(fraction) = share.as_f64() else {
            diags.schema(share_path, "number", json_type(share));
            clean = false;
            continue;
        };
        if !(0.0..=1.0).contains(&fraction) {
            diags.range(share_path, share, "0 <= x <= 1");
            clean = false;
            continue;
        }
        budget.insert(ty, fraction);
    }
    clean.then_some(budget)
}

fn read_graph(object: &Map<String, Value>, path: &str, diags: &mut Diagnostics) -> GraphOverlay {
    let mut r = ObjectReader::new(object, path, &["database", "maxHops", "maxResults"], diags);
    GraphOverlay {
        database: r.string("database"),
        max_hops: r.integer("maxHops", IntBound::between(1, MAX_GRAPH_HOPS)),
        max_results: r.integer("maxResults", IntBound::at_least(1)),
    }
}

fn read_compressed(
    object: &Map<String, Value>,
    path: &str,
    diags: &mut Diagnostics,
) -> CompressedOverlay {
    let mut r = ObjectReader::new(
        object,
        path,
        &["compressionRatio", "method", "preserveRecent"],
        diags,
    );
    CompressedOverlay {
        compression_ratio: r.number(
            "compressionRatio",
            NumberBound::LeftOpen(1.0, MAX_COMPRESSION_RATIO),
        ),
        method: r.named("method"),
        preserve_recent: r.integer("preserveRecent", IntBound::at_least(0)),
    }
}
