//! Variant matrix extraction and semantic state mapping.

use weft_core::SourceNode;

use crate::ir::{SemanticState, StateMapping, VariantEntry, VariantMatrix};

/// Collect the variant matrix from the source root.
///
/// A component set contributes one entry per member child; a plain node
/// carrying its own variant-property map contributes a single entry.
pub(crate) fn extract_variants(root: &SourceNode) -> VariantMatrix {
    let mut entries = Vec::new();

    if root.is_component_set() {
        for child in &root.children {
            if !child.variant_properties.is_empty() {
                entries.push(VariantEntry {
                    name: child.name.clone(),
                    properties: child.variant_properties.clone(),
                });
            }
        }
    } else if !root.variant_properties.is_empty() {
        entries.push(VariantEntry {
            name: root.name.clone(),
            properties: root.variant_properties.clone(),
        });
    }

    VariantMatrix { entries }
}

/// Bucket each variant into one semantic state by substring match.
///
/// Both the variant name and its `key=value` property pairs are searched,
/// so a member named `State=Hover` and a plain node with `{state: hover}`
/// land in the same bucket. Unmatched variants map to `Custom`.
pub(crate) fn map_states(variants: &VariantMatrix) -> Vec<StateMapping> {
    variants
        .entries
        .iter()
        .map(|entry| {
            let mut haystack = entry.name.to_lowercase();
            for (key, value) in &entry.properties {
                haystack.push(' ');
                haystack.push_str(&key.to_lowercase());
                haystack.push('=');
                haystack.push_str(&value.to_lowercase());
            }
            StateMapping {
                variant: entry.name.clone(),
                state: bucket(&haystack),
            }
        })
        .collect()
}

fn bucket(haystack: &str) -> SemanticState {
    if haystack.contains("hover") {
        SemanticState::Hover
    } else if haystack.contains("press") || haystack.contains("active") {
        SemanticState::Pressed
    } else if haystack.contains("focus") {
        SemanticState::Focus
    } else if haystack.contains("disable") {
        SemanticState::Disabled
    } else if haystack.contains("default") {
        SemanticState::Default
    } else {
        SemanticState::Custom
    }
}
