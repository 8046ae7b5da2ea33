//! Structural IR data model.
//!
//! The structural IR is an index-addressed arena of normalized nodes plus
//! the component-level facts the later stages need: the variant matrix,
//! the slot list, layout intent, CSS hints, and the variant-to-state
//! mapping. All records are immutable once extraction returns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use weft_core::{
    BlendMode, CornerRadius, Effect, Padding, Paint, Rect, StrokeLayer, Typography,
};

/// Index of a node within a [`NodeTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Arena of structural nodes, rooted at one top node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeTree {
    pub nodes: Vec<IrNode>,
    pub root: NodeId,
}

impl NodeTree {
    pub fn get(&self, id: NodeId) -> Option<&IrNode> {
        self.nodes.get(id.0)
    }

    pub fn root_node(&self) -> Option<&IrNode> {
        self.get(self.root)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visit every node depth-first starting at the root.
    pub fn walk(&self, f: &mut impl FnMut(NodeId, &IrNode)) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            f(id, node);
            // Push in reverse so children visit in document order.
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
    }

    /// Maximum depth of the tree, counting the root as 1.
    pub fn max_depth(&self) -> usize {
        fn depth(tree: &NodeTree, id: NodeId) -> usize {
            let Some(node) = tree.get(id) else { return 0 };
            1 + node
                .children
                .iter()
                .map(|c| depth(tree, *c))
                .max()
                .unwrap_or(0)
        }
        depth(self, self.root)
    }
}

/// One normalized node of the structural tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IrNode {
    /// Identity in the source document.
    pub source_id: String,
    pub name: String,
    /// The raw type tag as exported (`FRAME`, `TEXT`, `VECTOR`, ...).
    pub node_type: String,
    pub role_hint: Option<RoleHint>,
    pub bounds: Option<Rect>,
    pub layout: Option<LayoutDescriptor>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<StrokeLayer>,
    pub effects: Vec<Effect>,
    pub typography: Option<Typography>,
    pub text: Option<String>,
    pub corner_radius: Option<CornerRadius>,
    pub blend_mode: BlendMode,
    pub opacity: Option<f64>,
    pub slot_name: Option<String>,
    /// Position among visible siblings.
    pub z_index: usize,
    pub children: Vec<NodeId>,
    pub vector_paths: Vec<VectorPath>,
    pub text_path: Option<TextPath>,
}

/// Element role inferred from the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleHint {
    Button,
    IconLeft,
    IconRight,
    Icon,
    Label,
    Overlay,
    Input,
}

/// Auto-layout facts captured from a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    pub axis: FlexAxis,
    pub main_align: FlexAlign,
    pub cross_align: FlexAlign,
    pub gap: f64,
    pub padding: Padding,
}

/// Flex direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexAxis {
    Row,
    Column,
}

impl FlexAxis {
    pub fn to_css(&self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

/// Flex alignment on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexAlign {
    Start,
    Center,
    End,
    SpaceBetween,
    Baseline,
}

impl FlexAlign {
    pub fn to_css(&self) -> &'static str {
        match self {
            Self::Start => "flex-start",
            Self::Center => "center",
            Self::End => "flex-end",
            Self::SpaceBetween => "space-between",
            Self::Baseline => "baseline",
        }
    }
}

/// A vector path carried through for SVG rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorPath {
    pub data: String,
    pub winding_rule: Option<String>,
}

/// Text-on-a-curve data carried through for SVG rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextPath {
    pub path: String,
    pub start_offset: f64,
}

/// Named property-set per design variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantMatrix {
    pub entries: Vec<VariantEntry>,
}

impl VariantMatrix {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Property key -> ordered list of distinct observed values.
    pub fn property_values(&self) -> IndexMap<String, Vec<String>> {
        let mut out: IndexMap<String, Vec<String>> = IndexMap::new();
        for entry in &self.entries {
            for (key, value) in &entry.properties {
                let values = out.entry(key.clone()).or_default();
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        out
    }
}

/// One design variant and its property values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantEntry {
    pub name: String,
    pub properties: IndexMap<String, String>,
}

/// A named insertion point detected in the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotDefinition {
    /// Unique within one extraction.
    pub name: String,
    pub kind: SlotKind,
    /// Source id of the node the slot was detected on.
    pub node_id: String,
}

/// The fixed slot vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Label,
    Icon,
    Content,
    Action,
    Prefix,
    Suffix,
    Helper,
    Error,
}

impl SlotKind {
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Icon => "icon",
            Self::Content => "content",
            Self::Action => "action",
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
            Self::Helper => "helper",
            Self::Error => "error",
        }
    }

    /// Vocabulary in scan priority order.
    pub fn all() -> [SlotKind; 8] {
        [
            Self::Label,
            Self::Icon,
            Self::Content,
            Self::Action,
            Self::Prefix,
            Self::Suffix,
            Self::Helper,
            Self::Error,
        ]
    }
}

/// Sizing intent per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingIntent {
    Fixed,
    Fluid,
    #[default]
    Intrinsic,
}

/// Layout intent for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutIntent {
    pub horizontal: SizingIntent,
    pub vertical: SizingIntent,
}

/// Flags for CSS features the generated styles will need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CssHints {
    pub needs_pseudo_element: bool,
    pub needs_mask: bool,
    pub needs_filter_workaround: bool,
}

/// Semantic interaction states a variant can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticState {
    Default,
    Hover,
    Pressed,
    Focus,
    Disabled,
    Custom,
}

impl SemanticState {
    /// CSS pseudo-class trigger equivalent, empty for the default state.
    pub fn css_trigger(&self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Hover => ":hover",
            Self::Pressed => ":active",
            Self::Focus => ":focus-visible",
            Self::Disabled => ":disabled",
            Self::Custom => "",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hover => "hover",
            Self::Pressed => "pressed",
            Self::Focus => "focus",
            Self::Disabled => "disabled",
            Self::Custom => "custom",
        }
    }
}

/// Pairing of one variant name with one semantic state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMapping {
    pub variant: String,
    pub state: SemanticState,
}

/// Extraction metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractMeta {
    pub name: String,
    pub source_url: Option<String>,
    pub source_node_id: String,
    /// Supplied by the caller; the pipeline itself never reads a clock.
    pub extracted_at: Option<String>,
}

/// The structural intermediate representation of one component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuralIr {
    pub meta: ExtractMeta,
    pub tree: NodeTree,
    pub variants: VariantMatrix,
    pub slots: Vec<SlotDefinition>,
    pub layout_intent: LayoutIntent,
    pub css_hints: CssHints,
    pub state_mapping: Vec<StateMapping>,
}

impl StructuralIr {
    /// Find a slot definition by its unique name.
    pub fn slot(&self, name: &str) -> Option<&SlotDefinition> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// The states named by the mapping, deduplicated in mapping order.
    pub fn mapped_states(&self) -> Vec<SemanticState> {
        let mut states = Vec::new();
        for mapping in &self.state_mapping {
            if !states.contains(&mapping.state) {
                states.push(mapping.state);
            }
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_walk_order() {
        let mut tree = NodeTree::default();
        tree.nodes = vec![
            IrNode {
                name: "root".into(),
                children: vec![NodeId(1), NodeId(2)],
                ..Default::default()
            },
            IrNode { name: "a".into(), ..Default::default() },
            IrNode { name: "b".into(), ..Default::default() },
        ];
        tree.root = NodeId(0);

        let mut visited = Vec::new();
        tree.walk(&mut |_, node| visited.push(node.name.clone()));
        assert_eq!(visited, vec!["root", "a", "b"]);
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn test_variant_property_values() {
        let matrix = VariantMatrix {
            entries: vec![
                VariantEntry {
                    name: "State=Default".into(),
                    properties: IndexMap::from([("state".to_string(), "default".to_string())]),
                },
                VariantEntry {
                    name: "State=Hover".into(),
                    properties: IndexMap::from([("state".to_string(), "hover".to_string())]),
                },
            ],
        };

        let values = matrix.property_values();
        assert_eq!(values["state"], vec!["default", "hover"]);
    }

    #[test]
    fn test_state_triggers() {
        assert_eq!(SemanticState::Hover.css_trigger(), ":hover");
        assert_eq!(SemanticState::Pressed.css_trigger(), ":active");
        assert_eq!(SemanticState::Default.css_trigger(), "");
    }
}
