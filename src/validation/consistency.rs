//! Cross-field checks that only ever produce conflict warnings.
//!
//! These run after resolution, so they see the values the runtime will
//! actually use rather than whatever subset the document spelled out.

use std::collections::BTreeMap;

use super::diagnostics::Diagnostics;
use super::reader::index_path;
use crate::config::{ConfigOverlay, McpConfig};
use crate::constants::BUDGET_SUM_TOLERANCE;
use crate::schema::{HybridSettings, MemoryType, TokenSettings, TypeSettings};

pub(super) fn check_consistency(overlay: &ConfigOverlay, config: &McpConfig, diags: &mut Diagnostics) {
    if overlay.mcp_types.is_some() {
        check_duplicate_types(&config.mcp_types, diags);
        check_unlisted_types(overlay, config, diags);
    }

    for settings in config.type_specific_config.values() {
        match settings {
            TypeSettings::Hybrid(hybrid) => check_hybrid(hybrid, diags),
            TypeSettings::Token(token) => check_token(token, diags),
            _ => {}
        }
    }
}

fn check_duplicate_types(types: &[MemoryType], diags: &mut Diagnostics) {
    let mut first_seen: BTreeMap<MemoryType, usize> = BTreeMap::new();
    for (index, ty) in types.iter().enumerate() {
        match first_seen.get(ty) {
            Some(first) => diags.conflict(
                index_path("mcpTypes", index),
                format!("'{ty}' is already listed at mcpTypes[{first}]"),
            ),
            None => {
                first_seen.insert(*ty, index);
            }
        }
    }
}

fn check_unlisted_types(overlay: &ConfigOverlay, config: &McpConfig, diags: &mut Diagnostics) {
    for ty in overlay.type_specific.keys() {
        if !config.uses(*ty) {
            diags.conflict(
                format!("typeSpecificConfig.{ty}"),
                format!("'{ty}' is configured but not listed in mcpTypes; its settings are unused"),
            );
        }
    }
}

fn check_hybrid(hybrid: &HybridSettings, diags: &mut Diagnostics) {
    const PATH: &str = "typeSpecificConfig.hybrid";

    check_duplicate_components(&hybrid.memory_types, diags);

    let total: f64 = hybrid.budget_allocation.values().sum();
    if (total - 1.0).abs() > BUDGET_SUM_TOLERANCE {
        diags.conflict(
            format!("{PATH}.budgetAllocation"),
            format!("budget shares sum to {total}, expected 1.0"),
        );
    }

    for ty in hybrid.budget_allocation.keys() {
        if !hybrid.memory_types.contains(ty) {
            diags.conflict(
                format!("{PATH}.budgetAllocation.{ty}"),
                format!("'{ty}' has a budget share but is not in memoryTypes"),
            );
        }
    }

    for (index, ty) in hybrid.memory_types.iter().enumerate() {
        if !hybrid.budget_allocation.contains_key(ty) {
            diags.conflict(
                index_path(&format!("{PATH}.memoryTypes"), index),
                format!("'{ty}' has no budget share and will receive none"),
            );
        }
    }
}

fn check_duplicate_components(types: &[MemoryType], diags: &mut Diagnostics) {
    for (index, ty) in types.iter().enumerate() {
        if types[..index].contains(ty) {
            diags.conflict(
                index_path("typeSpecificConfig.hybrid.memoryTypes", index),
                format!("'{ty}' is listed more than once"),
            );
        }
    }
}

fn check_token(token: &TokenSettings, diags: &mut Diagnostics) {
    if token.reserved_output_tokens >= token.max_context_window {
        diags.conflict(
            "typeSpecificConfig.token.reservedOutputTokens",
            format!(
                "{} reserved output tokens leave no room in a {}-token context window",
                token.reserved_output_tokens, token.max_context_window
            ),
        );
    }
}
