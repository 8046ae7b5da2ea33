//! Structural IR extraction.
//!
//! Normalizes a raw design-tool node tree into the structural
//! intermediate representation: an index-addressed node arena plus the
//! variant matrix, detected slots, layout intent, CSS hints, and the
//! variant-to-state mapping.
//!
//! Extraction is a pure function and never fails on well-formed input;
//! missing optional fields are omitted rather than reported.

mod builder;
pub mod ir;
mod slots;
mod variants;

pub use ir::{
    CssHints, ExtractMeta, FlexAlign, FlexAxis, IrNode, LayoutDescriptor, LayoutIntent, NodeId,
    NodeTree, RoleHint, SemanticState, SizingIntent, SlotDefinition, SlotKind, StateMapping,
    StructuralIr, TextPath, VariantEntry, VariantMatrix, VectorPath,
};

use weft_core::SourceNode;

/// Extract the structural IR for one component from its source root.
///
/// `source_url` and `extracted_at` are caller-supplied metadata; the
/// extractor itself touches no clock and performs no I/O.
pub fn extract(
    root: &SourceNode,
    source_url: Option<&str>,
    extracted_at: Option<&str>,
) -> StructuralIr {
    let mut tree = builder::build_tree(root);
    let slots = slots::detect_slots(&mut tree);
    let variants = variants::extract_variants(root);
    let state_mapping = variants::map_states(&variants);

    tracing::debug!(
        name = %root.name,
        nodes = tree.len(),
        slots = slots.len(),
        variants = variants.entries.len(),
        "structural extraction complete"
    );

    StructuralIr {
        meta: ExtractMeta {
            name: root.name.clone(),
            source_url: source_url.map(str::to_string),
            source_node_id: root.id.clone(),
            extracted_at: extracted_at.map(str::to_string),
        },
        tree,
        variants,
        slots,
        layout_intent: builder::layout_intent(root),
        css_hints: builder::css_hints(root),
        state_mapping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::HashSet;

    fn button_source() -> SourceNode {
        serde_json::from_str(
            r#"{
                "id": "1:1",
                "name": "Button/Primary",
                "type": "COMPONENT",
                "layoutMode": "HORIZONTAL",
                "itemSpacing": 8,
                "layoutSizingHorizontal": "HUG",
                "layoutSizingVertical": "FIXED",
                "variantProperties": { "state": "hover" },
                "children": [
                    {
                        "id": "1:2",
                        "name": "Label",
                        "type": "TEXT",
                        "characters": "Click me",
                        "style": { "fontSize": 14, "fontWeight": 600 }
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_extract_button() {
        let ir = extract(&button_source(), Some("https://example.test/file"), None);

        assert_eq!(ir.meta.name, "Button/Primary");
        assert_eq!(ir.meta.source_node_id, "1:1");
        assert_eq!(ir.tree.len(), 2);

        let root = ir.tree.root_node().unwrap();
        assert_eq!(root.role_hint, Some(RoleHint::Button));
        assert_eq!(root.layout.as_ref().unwrap().gap, 8.0);

        let label = ir.tree.get(root.children[0]).unwrap();
        assert_eq!(label.text.as_deref(), Some("Click me"));
        assert_eq!(label.typography.as_ref().unwrap().weight, Some(600));
    }

    #[test]
    fn test_layout_intent_from_sizing_modes() {
        let ir = extract(&button_source(), None, None);
        assert_eq!(ir.layout_intent.horizontal, SizingIntent::Intrinsic);
        assert_eq!(ir.layout_intent.vertical, SizingIntent::Fixed);
    }

    #[test]
    fn test_state_mapping_includes_hover() {
        let ir = extract(&button_source(), None, None);
        assert_eq!(ir.mapped_states(), vec![SemanticState::Hover]);
    }

    #[test]
    fn test_slot_uniqueness_property() {
        let mut root = SourceNode {
            id: "2:0".into(),
            name: "Input".into(),
            node_type: "FRAME".into(),
            ..Default::default()
        };
        for (i, name) in ["Label", "Icon left", "Icon right", "Icon", "Helper text"]
            .iter()
            .enumerate()
        {
            root.children.push(SourceNode {
                id: format!("2:{}", i + 1),
                name: name.to_string(),
                node_type: "FRAME".into(),
                ..Default::default()
            });
        }

        let ir = extract(&root, None, None);
        let names: HashSet<_> = ir.slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), ir.slots.len(), "slot names must be unique");
    }

    #[test]
    fn test_extraction_never_fails_on_bare_node() {
        let bare = SourceNode {
            id: "3:0".into(),
            name: "Container".into(),
            node_type: "FRAME".into(),
            ..Default::default()
        };

        let ir = extract(&bare, None, None);
        assert_eq!(ir.tree.len(), 1);
        assert!(ir.variants.is_empty());
        assert!(ir.slots.is_empty());
        assert!(ir.state_mapping.is_empty());
        let root = ir.tree.root_node().unwrap();
        assert!(root.bounds.is_none());
        assert!(root.layout.is_none());
        assert!(root.typography.is_none());
    }

    #[test]
    fn test_component_set_extraction() {
        let mut set = SourceNode {
            id: "4:0".into(),
            name: "Checkbox".into(),
            node_type: "COMPONENT_SET".into(),
            ..Default::default()
        };
        for (i, (name, value)) in [("State=Default", "default"), ("State=Focus", "focus")]
            .iter()
            .enumerate()
        {
            set.children.push(SourceNode {
                id: format!("4:{}", i + 1),
                name: name.to_string(),
                node_type: "COMPONENT".into(),
                variant_properties: IndexMap::from([(
                    "state".to_string(),
                    value.to_string(),
                )]),
                ..Default::default()
            });
        }

        let ir = extract(&set, None, None);
        assert_eq!(ir.variants.entries.len(), 2);
        assert_eq!(
            ir.mapped_states(),
            vec![SemanticState::Default, SemanticState::Focus]
        );
    }
}
