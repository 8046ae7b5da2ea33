//! Recursive node-tree markup rendering.
//!
//! The second recursive descent of the pipeline: structural nodes become
//! JSX. Vector geometry renders as inline SVG, text-on-a-curve as SVG
//! text-on-path, slot nodes as prop expressions, and everything else as
//! a generic element picked from the node's role hint.

use weft_core::{format_scalar, Paint};
use weft_extract::{IrNode, NodeId, NodeTree, RoleHint};

use crate::naming::{css_ident, escape_jsx_text, prop_ident};
use crate::styles::gradient_css;
use crate::vector;
use crate::StyleTokenLookup;

pub(crate) struct MarkupRenderer<'a> {
    tree: &'a NodeTree,
    tokens: &'a StyleTokenLookup,
}

impl<'a> MarkupRenderer<'a> {
    pub(crate) fn new(tree: &'a NodeTree, tokens: &'a StyleTokenLookup) -> Self {
        Self { tree, tokens }
    }

    /// Render every child of the root node; empty when it has none.
    pub(crate) fn render_root_children(&self, indent: usize) -> Vec<String> {
        let Some(root) = self.tree.root_node() else {
            return Vec::new();
        };
        root.children
            .iter()
            .flat_map(|child| self.render_node(*child, indent))
            .collect()
    }

    pub(crate) fn render_node(&self, id: NodeId, indent: usize) -> Vec<String> {
        let Some(node) = self.tree.get(id) else {
            return Vec::new();
        };
        let pad = " ".repeat(indent);

        // A slot node renders as its prop expression; the external
        // content replaces whatever the design showed.
        if let Some(slot) = &node.slot_name {
            return vec![format!("{}{{{}}}", pad, prop_ident(slot))];
        }

        if is_vector_type(&node.node_type) || !node.vector_paths.is_empty() {
            return vector::render_svg(node, indent);
        }

        if node.node_type.eq_ignore_ascii_case("TEXT") {
            if node.text_path.is_some() {
                return vector::render_text_on_path(node, indent);
            }
            let class = css_ident(&node.name);
            return match &node.text {
                Some(text) => vec![format!(
                    "{}<span className=\"{}\">{}</span>",
                    pad,
                    class,
                    escape_jsx_text(text)
                )],
                None => vec![format!("{}<span className=\"{}\" />", pad, class)],
            };
        }

        self.render_element(node, indent)
    }

    fn render_element(&self, node: &IrNode, indent: usize) -> Vec<String> {
        let pad = " ".repeat(indent);
        // An input is a void element; a hinted input that still carries
        // children renders as a wrapper instead.
        let tag = match element_tag(node) {
            "input" if !node.children.is_empty() => "div",
            tag => tag,
        };
        let class = css_ident(&node.name);

        let mut open = format!("{}<{} className=\"{}\"", pad, tag, class);
        if let Some(style) = self.style_attr(node) {
            open.push(' ');
            open.push_str(&style);
        }

        if node.children.is_empty() {
            open.push_str(" />");
            return vec![open];
        }

        open.push('>');
        let mut lines = vec![open];
        for child in &node.children {
            lines.extend(self.render_node(*child, indent + 2));
        }
        lines.push(format!("{}</{}>", pad, tag));
        lines
    }

    fn style_attr(&self, node: &IrNode) -> Option<String> {
        let mut entries = Vec::new();

        if let Some(bounds) = node.bounds {
            entries.push(format!("width: {}", format_scalar(bounds.width)));
            entries.push(format!("height: {}", format_scalar(bounds.height)));
        }
        if let Some(opacity) = node.opacity {
            if opacity < 1.0 {
                entries.push(format!("opacity: {}", format_scalar(opacity)));
            }
        }
        if let Some(background) = self.background_value(node) {
            entries.push(format!("background: '{}'", background));
        }

        if entries.is_empty() {
            None
        } else {
            Some(format!("style={{{{ {} }}}}", entries.join(", ")))
        }
    }

    /// Background value for one node: a literal, or a custom-property
    /// reference when the style-token lookup knows the literal.
    fn background_value(&self, node: &IrNode) -> Option<String> {
        match node.fills.first()? {
            Paint::Solid { color, .. } => {
                let literal = color.to_css();
                Some(match self.tokens.resolve(&literal) {
                    Some(variable) => format!("var({}, {})", variable, literal),
                    None => literal,
                })
            }
            Paint::Gradient(gradient) => Some(gradient_css(gradient)),
            Paint::Image { image_ref, .. } => Some(format!("url({})", image_ref)),
        }
    }
}

fn is_vector_type(node_type: &str) -> bool {
    matches!(
        node_type.to_ascii_uppercase().as_str(),
        "VECTOR" | "BOOLEAN_OPERATION" | "STAR" | "POLYGON" | "LINE"
    )
}

fn element_tag(node: &IrNode) -> &'static str {
    match node.role_hint {
        Some(RoleHint::Button) => "button",
        Some(RoleHint::Input) => "input",
        Some(RoleHint::Label) => "span",
        Some(RoleHint::Icon | RoleHint::IconLeft | RoleHint::IconRight) => "span",
        Some(RoleHint::Overlay) | None => "div",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{Color, Rect};

    fn lookup() -> StyleTokenLookup {
        StyleTokenLookup::default()
    }

    fn tree(nodes: Vec<IrNode>) -> NodeTree {
        NodeTree { nodes, root: NodeId(0) }
    }

    #[test]
    fn test_slot_node_renders_prop_expression() {
        let tree = tree(vec![
            IrNode {
                name: "Button".into(),
                node_type: "FRAME".into(),
                children: vec![NodeId(1)],
                ..Default::default()
            },
            IrNode {
                name: "Icon left".into(),
                node_type: "FRAME".into(),
                slot_name: Some("icon-left".into()),
                ..Default::default()
            },
        ]);

        let tokens = lookup();
        let renderer = MarkupRenderer::new(&tree, &tokens);
        assert_eq!(renderer.render_root_children(0), vec!["{iconLeft}"]);
    }

    #[test]
    fn test_text_node_renders_span() {
        let tree = tree(vec![
            IrNode {
                name: "Row".into(),
                node_type: "FRAME".into(),
                children: vec![NodeId(1)],
                ..Default::default()
            },
            IrNode {
                name: "Value".into(),
                node_type: "TEXT".into(),
                text: Some("3 < 5".into()),
                ..Default::default()
            },
        ]);

        let tokens = lookup();
        let renderer = MarkupRenderer::new(&tree, &tokens);
        assert_eq!(
            renderer.render_root_children(2),
            vec!["  <span className=\"value\">3 &lt; 5</span>"]
        );
    }

    #[test]
    fn test_generic_element_with_inline_style() {
        let tree = tree(vec![
            IrNode {
                name: "Card".into(),
                node_type: "FRAME".into(),
                children: vec![NodeId(1)],
                ..Default::default()
            },
            IrNode {
                name: "Thumb".into(),
                node_type: "RECTANGLE".into(),
                bounds: Some(Rect::new(0.0, 0.0, 120.0, 80.0)),
                opacity: Some(0.5),
                fills: vec![Paint::Solid {
                    color: Color::rgb(0.2, 0.4, 1.0),
                    opacity: 1.0,
                }],
                ..Default::default()
            },
        ]);

        let tokens = lookup();
        let renderer = MarkupRenderer::new(&tree, &tokens);
        let lines = renderer.render_root_children(0);
        assert_eq!(
            lines,
            vec![
                "<div className=\"thumb\" style={{ width: 120, height: 80, opacity: 0.5, background: '#3366ff' }} />"
            ]
        );
    }

    #[test]
    fn test_token_lookup_replaces_literal() {
        let mut tokens = StyleTokenLookup::default();
        tokens.insert("#3366ff", "--color-primary-500");

        let tree = tree(vec![
            IrNode {
                name: "Root".into(),
                node_type: "FRAME".into(),
                children: vec![NodeId(1)],
                ..Default::default()
            },
            IrNode {
                name: "Fill".into(),
                node_type: "RECTANGLE".into(),
                fills: vec![Paint::Solid {
                    color: Color::rgb(0.2, 0.4, 1.0),
                    opacity: 1.0,
                }],
                ..Default::default()
            },
        ]);

        let renderer = MarkupRenderer::new(&tree, &tokens);
        let lines = renderer.render_root_children(0);
        assert!(lines[0].contains("background: 'var(--color-primary-500, #3366ff)'"));
    }

    #[test]
    fn test_empty_root_renders_nothing() {
        let tree = tree(vec![IrNode {
            name: "Empty".into(),
            node_type: "FRAME".into(),
            ..Default::default()
        }]);

        let tokens = lookup();
        let renderer = MarkupRenderer::new(&tree, &tokens);
        assert!(renderer.render_root_children(0).is_empty());
    }
}
