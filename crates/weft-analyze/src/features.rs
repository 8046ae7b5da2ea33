//! Structural feature collection.
//!
//! A second depth-first walk over the structural tree gathering the
//! boolean feature vector the structure classifier matches against.

use weft_extract::{RoleHint, StructuralIr};

/// Boolean feature vector plus tree measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StructuralFeatures {
    pub has_text: bool,
    pub has_icon: bool,
    pub has_input: bool,
    pub has_list: bool,
    pub has_overlay: bool,
    pub has_checkbox: bool,
    pub has_radio: bool,
    pub has_slider: bool,
    pub max_depth: usize,
    pub interaction_count: usize,
}

/// Collect the feature vector for one structural IR.
pub fn collect(ir: &StructuralIr) -> StructuralFeatures {
    let mut features = StructuralFeatures {
        max_depth: ir.tree.max_depth(),
        ..Default::default()
    };

    ir.tree.walk(&mut |_, node| {
        let name = node.name.to_lowercase();

        if node.node_type.eq_ignore_ascii_case("TEXT") || node.role_hint == Some(RoleHint::Label)
        {
            features.has_text = true;
        }
        if matches!(
            node.role_hint,
            Some(RoleHint::Icon | RoleHint::IconLeft | RoleHint::IconRight)
        ) || !node.vector_paths.is_empty()
        {
            features.has_icon = true;
        }
        if node.role_hint == Some(RoleHint::Input) {
            features.has_input = true;
        }
        if name.contains("list") || name.contains("option") || name.contains("item") {
            features.has_list = true;
        }
        if node.role_hint == Some(RoleHint::Overlay) {
            features.has_overlay = true;
        }
        if name.contains("checkbox") {
            features.has_checkbox = true;
        }
        if name.contains("radio") {
            features.has_radio = true;
        }
        if name.contains("slider") || name.contains("range") {
            features.has_slider = true;
        }

        let interactive = matches!(node.role_hint, Some(RoleHint::Button | RoleHint::Input))
            || name.contains("checkbox")
            || name.contains("radio")
            || name.contains("switch")
            || name.contains("slider")
            || name.contains("link");
        if interactive {
            features.interaction_count += 1;
        }
    });

    features
}
