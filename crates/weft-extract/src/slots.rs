//! Slot detection.
//!
//! One scan over the built arena against the fixed slot vocabulary.
//! Name collisions resolve first through a directional hint in the node
//! name, then through a numeric suffix; a collision on base plus hint
//! stacks the numeric suffix on the hinted name.

use std::collections::HashSet;

use crate::ir::{NodeTree, SlotDefinition, SlotKind};

const DIRECTIONAL_HINTS: [&str; 8] = [
    "left", "right", "top", "bottom", "start", "end", "before", "after",
];

/// Detect slots over the whole tree and stamp `slot_name` onto the nodes.
pub(crate) fn detect_slots(tree: &mut NodeTree) -> Vec<SlotDefinition> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut slots = Vec::new();

    // Arena order is depth-first document order, so a plain index walk
    // matches the visual order of the tree.
    for node in &mut tree.nodes {
        let lower = node.name.to_lowercase();
        let Some(kind) = match_kind(&lower) else { continue };

        let name = unique_name(kind, &lower, &mut taken);
        node.slot_name = Some(name.clone());
        slots.push(SlotDefinition {
            name,
            kind,
            node_id: node.source_id.clone(),
        });
    }

    slots
}

fn match_kind(lower_name: &str) -> Option<SlotKind> {
    SlotKind::all()
        .into_iter()
        .find(|kind| lower_name.contains(kind.base_name()))
}

fn unique_name(kind: SlotKind, lower_name: &str, taken: &mut HashSet<String>) -> String {
    let base = kind.base_name().to_string();
    if taken.insert(base.clone()) {
        return base;
    }

    // Second occurrence of the same base: try the directional hint.
    let stem = match directional_hint(lower_name) {
        Some(hint) => {
            let hinted = format!("{}-{}", base, hint);
            if taken.insert(hinted.clone()) {
                return hinted;
            }
            hinted
        }
        None => base,
    };

    let mut counter = 2;
    loop {
        let candidate = format!("{}-{}", stem, counter);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

fn directional_hint(lower_name: &str) -> Option<&'static str> {
    DIRECTIONAL_HINTS
        .into_iter()
        .find(|hint| lower_name.contains(hint))
}
