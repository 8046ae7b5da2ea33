//! Schema validation of the IR inputs.
//!
//! The one hard-failure path in the pipeline: a violation here means an
//! upstream builder broke its contract, not that the design data was
//! incomplete. Messages carry the field path of the offending value.

use std::collections::HashSet;

use weft_analyze::InteractionModel;
use weft_extract::{SemanticState, StructuralIr};
use weft_tokens::TokenIr;

use crate::error::{GenError, Result};

/// Validate the IR triple before generation.
pub fn validate(irs: &StructuralIr, irt: &TokenIr, iml: &InteractionModel) -> Result<()> {
    validate_structural(irs)?;
    validate_tokens(irt)?;
    validate_interaction(iml)?;
    Ok(())
}

fn validate_structural(irs: &StructuralIr) -> Result<()> {
    let node_count = irs.tree.nodes.len();
    if node_count == 0 {
        return Err(GenError::schema(
            "irs.tree.nodes",
            "tree must contain at least one node",
        ));
    }
    if irs.tree.root.0 >= node_count {
        return Err(GenError::schema(
            "irs.tree.root",
            format!(
                "root index {} out of bounds for {} nodes",
                irs.tree.root.0, node_count
            ),
        ));
    }

    // Strict forest: every child id is in bounds, no node is claimed
    // twice, and the root is nobody's child.
    let mut claimed: HashSet<usize> = HashSet::new();
    for (index, node) in irs.tree.nodes.iter().enumerate() {
        for (child_index, child) in node.children.iter().enumerate() {
            let path = format!("irs.tree.nodes[{}].children[{}]", index, child_index);
            if child.0 >= node_count {
                return Err(GenError::schema(
                    path,
                    format!("child index {} out of bounds", child.0),
                ));
            }
            if child.0 == index {
                return Err(GenError::schema(path, "node lists itself as a child"));
            }
            if child.0 == irs.tree.root.0 {
                return Err(GenError::schema(path, "root node appears as a child"));
            }
            if !claimed.insert(child.0) {
                return Err(GenError::schema(
                    path,
                    format!("node {} claimed by more than one parent", child.0),
                ));
            }
        }
    }

    let mut slot_names: HashSet<&str> = HashSet::new();
    for (index, slot) in irs.slots.iter().enumerate() {
        if slot.name.is_empty() {
            return Err(GenError::schema(
                format!("irs.slots[{}].name", index),
                "slot name must not be empty",
            ));
        }
        if !slot_names.insert(slot.name.as_str()) {
            return Err(GenError::schema(
                format!("irs.slots[{}].name", index),
                format!("duplicate slot name '{}'", slot.name),
            ));
        }
    }

    Ok(())
}

fn validate_tokens(irt: &TokenIr) -> Result<()> {
    for (index, edge) in irt.graph.edges.iter().enumerate() {
        if !irt.graph.nodes.contains(&edge.from) {
            return Err(GenError::schema(
                format!("irt.graph.edges[{}].from", index),
                format!("edge endpoint '{}' missing from graph nodes", edge.from),
            ));
        }
        if !irt.graph.nodes.contains(&edge.to) {
            return Err(GenError::schema(
                format!("irt.graph.edges[{}].to", index),
                format!("edge endpoint '{}' missing from graph nodes", edge.to),
            ));
        }
    }

    for name in irt.usage.keys() {
        if !irt.tokens.contains_key(name) {
            return Err(GenError::schema(
                format!("irt.usage['{}']", name),
                "usage entry references an unknown token",
            ));
        }
    }

    Ok(())
}

fn validate_interaction(iml: &InteractionModel) -> Result<()> {
    if iml.states.is_empty() {
        return Err(GenError::schema(
            "iml.states",
            "interaction model must carry at least one state",
        ));
    }
    if !iml.states.iter().any(|s| s.state == SemanticState::Default) {
        return Err(GenError::schema(
            "iml.states",
            "interaction model must include the default state",
        ));
    }
    for (index, spec) in iml.states.iter().enumerate() {
        let duplicated = iml.states[..index].iter().any(|s| s.state == spec.state);
        if duplicated {
            return Err(GenError::schema(
                format!("iml.states[{}].state", index),
                format!("state '{}' listed twice", spec.state.name()),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_analyze::{build_interaction, classify};
    use weft_core::SourceNode;
    use weft_extract::{extract, NodeId};

    fn valid_inputs() -> (StructuralIr, TokenIr, InteractionModel) {
        let node = SourceNode {
            id: "1:1".into(),
            name: "Button".into(),
            node_type: "COMPONENT".into(),
            ..Default::default()
        };
        let irs = extract(&node, None, None);
        let iml = build_interaction(&irs, &classify(&irs));
        (irs, TokenIr::default(), iml)
    }

    #[test]
    fn test_valid_inputs_pass() {
        let (irs, irt, iml) = valid_inputs();
        assert!(validate(&irs, &irt, &iml).is_ok());
    }

    #[test]
    fn test_out_of_bounds_child_fails_with_path() {
        let (mut irs, irt, iml) = valid_inputs();
        irs.tree.nodes[0].children.push(NodeId(99));

        let err = validate(&irs, &irt, &iml).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("irs.tree.nodes[0].children[0]"), "{}", message);
    }

    #[test]
    fn test_duplicate_slot_name_fails() {
        let (mut irs, irt, iml) = valid_inputs();
        for _ in 0..2 {
            irs.slots.push(weft_extract::SlotDefinition {
                name: "icon".into(),
                kind: weft_extract::SlotKind::Icon,
                node_id: "1:1".into(),
            });
        }

        let err = validate(&irs, &irt, &iml).unwrap_err();
        assert!(err.to_string().contains("irs.slots[1].name"));
    }

    #[test]
    fn test_empty_tree_fails() {
        let (mut irs, irt, iml) = valid_inputs();
        irs.tree.nodes.clear();

        let err = validate(&irs, &irt, &iml).unwrap_err();
        assert!(err.to_string().contains("irs.tree.nodes"));
    }

    #[test]
    fn test_dangling_graph_edge_fails() {
        let (irs, mut irt, iml) = valid_inputs();
        irt.graph.edges.push(weft_tokens::DependencyEdge {
            from: "ghost".into(),
            to: "ghost".into(),
            relation: weft_tokens::EdgeRelation::Alias,
        });

        let err = validate(&irs, &irt, &iml).unwrap_err();
        assert!(err.to_string().contains("irt.graph.edges[0].from"));
    }

    #[test]
    fn test_missing_default_state_fails() {
        let (irs, irt, mut iml) = valid_inputs();
        iml.states.clear();

        let err = validate(&irs, &irt, &iml).unwrap_err();
        assert!(err.to_string().contains("iml.states"));
    }
}
