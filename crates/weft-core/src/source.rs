//! The source design-document model.
//!
//! These records mirror the JSON a design tool exports for one node
//! subtree plus its variable table. They are read-only input: every field
//! the pipeline does not understand is simply absent after
//! deserialization, and no stage ever mutates a source record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{BlendMode, Color, Point, Rect};

/// One node of the exported design tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub visible: Option<bool>,
    pub children: Vec<SourceNode>,
    pub absolute_bounding_box: Option<Rect>,

    // Auto-layout fields; only meaningful when `layout_mode` is set.
    pub layout_mode: Option<LayoutMode>,
    pub primary_axis_align_items: Option<AxisAlign>,
    pub counter_axis_align_items: Option<AxisAlign>,
    pub item_spacing: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub layout_sizing_horizontal: Option<LayoutSizing>,
    pub layout_sizing_vertical: Option<LayoutSizing>,

    pub fills: Vec<SourcePaint>,
    pub strokes: Vec<SourcePaint>,
    pub stroke_weight: Option<f64>,
    pub stroke_align: Option<String>,
    pub effects: Vec<SourceEffect>,
    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<[f64; 4]>,
    pub opacity: Option<f64>,
    pub blend_mode: Option<BlendMode>,
    pub is_mask: Option<bool>,

    // Text nodes only.
    pub characters: Option<String>,
    pub style: Option<SourceTypeStyle>,
    pub text_path: Option<SourceTextPath>,

    // Vector nodes only.
    pub vector_paths: Vec<SourceVectorPath>,

    /// Node property name -> variable binding.
    pub bound_variables: IndexMap<String, SourceVariableRef>,
    /// Variant property name -> literal value, on component-set members.
    pub variant_properties: IndexMap<String, String>,
}

impl SourceNode {
    /// Whether the node participates in extraction at all.
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Whether the raw type tag denotes a text node.
    pub fn is_text(&self) -> bool {
        self.node_type.eq_ignore_ascii_case("TEXT")
    }

    /// Whether the raw type tag denotes a component set.
    pub fn is_component_set(&self) -> bool {
        self.node_type.eq_ignore_ascii_case("COMPONENT_SET")
    }

    /// Whether the raw type tag denotes vector geometry.
    pub fn is_vector(&self) -> bool {
        matches!(
            self.node_type.to_ascii_uppercase().as_str(),
            "VECTOR" | "BOOLEAN_OPERATION" | "STAR" | "POLYGON" | "LINE"
        )
    }
}

/// Auto-layout flex axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
}

/// Auto-layout axis alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
}

/// Per-axis sizing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutSizing {
    Fixed,
    Hug,
    Fill,
}

/// A raw paint layer (fill or stroke).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourcePaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub color: Option<Color>,
    pub gradient_stops: Vec<SourceGradientStop>,
    pub gradient_transform: Option<[[f64; 3]; 2]>,
    /// Shared gradient style this layer aliases, if any.
    pub gradient_style_ref: Option<String>,
    pub image_ref: Option<String>,
    pub scale_mode: Option<String>,
}

/// A raw gradient stop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceGradientStop {
    pub position: f64,
    pub color: Option<Color>,
}

/// A raw effect entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub visible: Option<bool>,
    pub radius: Option<f64>,
    pub color: Option<Color>,
    pub offset: Option<Point>,
    pub spread: Option<f64>,
}

/// The text style block on a text node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceTypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<u16>,
    pub line_height_px: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_align_horizontal: Option<String>,
    pub italic: Option<bool>,
}

/// A raw vector path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceVectorPath {
    pub winding_rule: Option<String>,
    pub data: String,
}

/// Text-on-a-curve data attached to a text node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceTextPath {
    pub path: String,
    pub start_offset: Option<f64>,
}

/// A binding from a node property to a design variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceVariableRef {
    pub id: String,
}

/// One entry of the exported variable table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceVariable {
    pub id: String,
    pub name: String,
    pub resolved_type: String,
    pub values_by_mode: IndexMap<String, SourceVariableValue>,
    pub scopes: Vec<String>,
    pub variable_collection_id: Option<String>,
}

/// A per-mode variable value: a literal, or an alias onto another variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceVariableValue {
    Alias(SourceAlias),
    Color(Color),
    Number(f64),
    Flag(bool),
    Text(String),
}

impl Default for SourceVariableValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

/// The alias marker a variable value uses to reference another variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAlias {
    #[serde(rename = "type")]
    pub marker: String,
    pub id: String,
}

/// A variable collection with its modes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    pub modes: Vec<CollectionMode>,
    pub default_mode_id: Option<String>,
}

/// One mode of a variable collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionMode {
    pub mode_id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_node() {
        let json = r#"{
            "id": "1:2",
            "name": "Button/Primary",
            "type": "FRAME",
            "layoutMode": "HORIZONTAL",
            "itemSpacing": 8,
            "children": [
                { "id": "1:3", "name": "Label", "type": "TEXT", "characters": "Click me" }
            ]
        }"#;

        let node: SourceNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.name, "Button/Primary");
        assert_eq!(node.layout_mode, Some(LayoutMode::Horizontal));
        assert_eq!(node.children.len(), 1);
        assert!(node.children[0].is_text());
        assert!(node.is_visible());
    }

    #[test]
    fn test_deserialize_variable_alias_value() {
        let json = r#"{
            "id": "VariableID:1",
            "name": "color/primary/500",
            "resolvedType": "COLOR",
            "valuesByMode": {
                "m1": { "type": "VARIABLE_ALIAS", "id": "VariableID:2" },
                "m2": { "r": 0.2, "g": 0.4, "b": 1.0, "a": 1.0 }
            }
        }"#;

        let var: SourceVariable = serde_json::from_str(json).unwrap();
        assert!(matches!(
            var.values_by_mode.get("m1"),
            Some(SourceVariableValue::Alias(alias)) if alias.id == "VariableID:2"
        ));
        assert!(matches!(
            var.values_by_mode.get("m2"),
            Some(SourceVariableValue::Color(_))
        ));
    }

    #[test]
    fn test_deserialize_color_without_alpha() {
        let json = r#"{ "r": 1.0, "g": 0.5, "b": 0.0 }"#;
        let value: SourceVariableValue = serde_json::from_str(json).unwrap();
        match value {
            SourceVariableValue::Color(c) => assert_eq!(c.a, 1.0),
            other => panic!("expected color, got {:?}", other),
        }
    }

    #[test]
    fn test_vector_type_tags() {
        let mut node = SourceNode::default();
        for tag in ["VECTOR", "BOOLEAN_OPERATION", "STAR", "POLYGON"] {
            node.node_type = tag.to_string();
            assert!(node.is_vector(), "{} should be vector", tag);
        }
        node.node_type = "FRAME".to_string();
        assert!(!node.is_vector());
    }
}
