//! The structural extraction walk.
//!
//! One depth-first descent over the source tree. Each concern (layout,
//! paint, stroke, effect, typography, role hint) is captured by its own
//! function so partial nodes degrade to omitted fields instead of errors.
//! Extraction never fails on well-formed input.

use weft_core::{
    AxisAlign, BlendMode, CornerRadius, Effect, EffectKind, Gradient, GradientKind,
    GradientStop, ImageScaleMode, LayoutMode, LayoutSizing, Padding, Paint, SourceEffect,
    SourceNode, SourcePaint, SourceTypeStyle, StrokeAlign, StrokeLayer, TextAlign, Typography,
};

use crate::ir::{
    CssHints, FlexAlign, FlexAxis, IrNode, LayoutDescriptor, LayoutIntent, NodeId, NodeTree,
    RoleHint, SizingIntent, TextPath, VectorPath,
};

/// Build the node arena from a source root.
pub(crate) fn build_tree(root: &SourceNode) -> NodeTree {
    let mut nodes = Vec::new();
    let root_id = visit(root, 0, &mut nodes).unwrap_or(NodeId(0));
    if nodes.is_empty() {
        // An invisible root still yields a tree: keep the node, children dropped.
        nodes.push(capture_node(root, 0));
    }
    NodeTree { nodes, root: root_id }
}

fn visit(source: &SourceNode, z_index: usize, nodes: &mut Vec<IrNode>) -> Option<NodeId> {
    if !source.is_visible() {
        return None;
    }

    let id = NodeId(nodes.len());
    nodes.push(capture_node(source, z_index));

    let mut children = Vec::new();
    let mut child_z = 0;
    for child in &source.children {
        if let Some(child_id) = visit(child, child_z, nodes) {
            children.push(child_id);
            child_z += 1;
        }
    }
    nodes[id.0].children = children;

    Some(id)
}

fn capture_node(source: &SourceNode, z_index: usize) -> IrNode {
    IrNode {
        source_id: source.id.clone(),
        name: source.name.clone(),
        node_type: source.node_type.clone(),
        role_hint: role_hint(&source.name),
        bounds: source.absolute_bounding_box,
        layout: capture_layout(source),
        fills: capture_paints(&source.fills),
        strokes: capture_strokes(source),
        effects: capture_effects(&source.effects),
        typography: capture_typography(source),
        text: source.characters.clone(),
        corner_radius: capture_corner_radius(source),
        blend_mode: source.blend_mode.unwrap_or_default(),
        opacity: source.opacity,
        slot_name: None,
        z_index,
        children: Vec::new(),
        vector_paths: source
            .vector_paths
            .iter()
            .map(|p| VectorPath {
                data: p.data.clone(),
                winding_rule: p.winding_rule.clone(),
            })
            .collect(),
        text_path: source.text_path.as_ref().map(|t| TextPath {
            path: t.path.clone(),
            start_offset: t.start_offset.unwrap_or(0.0),
        }),
    }
}

/// Infer an element role from the display name alone.
pub(crate) fn role_hint(name: &str) -> Option<RoleHint> {
    let name = name.to_lowercase();
    if name.contains("button") {
        Some(RoleHint::Button)
    } else if name.contains("icon-left") || name.contains("icon left") {
        Some(RoleHint::IconLeft)
    } else if name.contains("icon-right") || name.contains("icon right") {
        Some(RoleHint::IconRight)
    } else if name.contains("icon") {
        Some(RoleHint::Icon)
    } else if name.contains("label") || name.contains("text") {
        Some(RoleHint::Label)
    } else if name.contains("dialog") || name.contains("modal") || name.contains("overlay") {
        Some(RoleHint::Overlay)
    } else if name.contains("input") || name.contains("field") {
        Some(RoleHint::Input)
    } else {
        None
    }
}

fn capture_layout(source: &SourceNode) -> Option<LayoutDescriptor> {
    let axis = match source.layout_mode? {
        LayoutMode::Horizontal => FlexAxis::Row,
        LayoutMode::Vertical => FlexAxis::Column,
        LayoutMode::None => return None,
    };

    Some(LayoutDescriptor {
        axis,
        main_align: flex_align(source.primary_axis_align_items),
        cross_align: flex_align(source.counter_axis_align_items),
        gap: source.item_spacing.unwrap_or(0.0),
        padding: Padding {
            left: source.padding_left.unwrap_or(0.0),
            right: source.padding_right.unwrap_or(0.0),
            top: source.padding_top.unwrap_or(0.0),
            bottom: source.padding_bottom.unwrap_or(0.0),
        },
    })
}

fn flex_align(align: Option<AxisAlign>) -> FlexAlign {
    match align {
        Some(AxisAlign::Center) => FlexAlign::Center,
        Some(AxisAlign::Max) => FlexAlign::End,
        Some(AxisAlign::SpaceBetween) => FlexAlign::SpaceBetween,
        Some(AxisAlign::Baseline) => FlexAlign::Baseline,
        Some(AxisAlign::Min) | None => FlexAlign::Start,
    }
}

fn capture_paints(layers: &[SourcePaint]) -> Vec<Paint> {
    layers.iter().filter_map(capture_paint).collect()
}

fn capture_paint(layer: &SourcePaint) -> Option<Paint> {
    if layer.visible == Some(false) {
        return None;
    }

    let paint_type = layer.paint_type.to_ascii_uppercase();
    match paint_type.as_str() {
        "SOLID" => Some(Paint::Solid {
            color: layer.color?,
            opacity: layer.opacity.unwrap_or(1.0),
        }),
        "IMAGE" => Some(Paint::Image {
            image_ref: layer.image_ref.clone().unwrap_or_default(),
            scale_mode: match layer.scale_mode.as_deref() {
                Some("FIT") => ImageScaleMode::Fit,
                Some("CROP") => ImageScaleMode::Crop,
                Some("TILE") => ImageScaleMode::Tile,
                _ => ImageScaleMode::Fill,
            },
        }),
        _ => {
            let kind = match paint_type.as_str() {
                "GRADIENT_LINEAR" => GradientKind::Linear,
                "GRADIENT_RADIAL" => GradientKind::Radial,
                "GRADIENT_ANGULAR" => GradientKind::Angular,
                "GRADIENT_DIAMOND" => GradientKind::Diamond,
                _ => return None,
            };
            Some(Paint::Gradient(Gradient {
                kind,
                stops: layer
                    .gradient_stops
                    .iter()
                    .filter_map(|stop| {
                        Some(GradientStop {
                            position: stop.position,
                            color: stop.color?,
                        })
                    })
                    .collect(),
                transform: layer.gradient_transform,
                style_ref: layer.gradient_style_ref.clone(),
            }))
        }
    }
}

fn capture_strokes(source: &SourceNode) -> Vec<StrokeLayer> {
    let align = match source.stroke_align.as_deref() {
        Some("CENTER") => StrokeAlign::Center,
        Some("OUTSIDE") => StrokeAlign::Outside,
        _ => StrokeAlign::Inside,
    };
    source
        .strokes
        .iter()
        .filter_map(capture_paint)
        .map(|paint| StrokeLayer {
            paint,
            weight: source.stroke_weight.unwrap_or(1.0),
            align,
        })
        .collect()
}

fn capture_effects(effects: &[SourceEffect]) -> Vec<Effect> {
    effects
        .iter()
        .filter_map(|effect| {
            // Only an explicit visible=false drops the entry; a visible
            // effect with zero radius is preserved.
            if effect.visible == Some(false) {
                return None;
            }
            let kind = match effect.effect_type.to_ascii_uppercase().as_str() {
                "DROP_SHADOW" => EffectKind::DropShadow,
                "INNER_SHADOW" => EffectKind::InnerShadow,
                "LAYER_BLUR" => EffectKind::LayerBlur,
                "BACKGROUND_BLUR" => EffectKind::BackgroundBlur,
                _ => return None,
            };
            Some(Effect {
                kind,
                radius: effect.radius.unwrap_or(0.0),
                color: effect.color,
                offset: effect.offset,
                spread: effect.spread,
            })
        })
        .collect()
}

fn capture_typography(source: &SourceNode) -> Option<Typography> {
    if !source.is_text() {
        return None;
    }
    let style: &SourceTypeStyle = source.style.as_ref()?;
    Some(Typography {
        family: style.font_family.clone(),
        size: style.font_size,
        weight: style.font_weight,
        line_height: style.line_height_px,
        letter_spacing: style.letter_spacing,
        align: match style.text_align_horizontal.as_deref() {
            Some("LEFT") => Some(TextAlign::Left),
            Some("CENTER") => Some(TextAlign::Center),
            Some("RIGHT") => Some(TextAlign::Right),
            Some("JUSTIFIED") => Some(TextAlign::Justified),
            _ => None,
        },
        italic: style.italic.unwrap_or(false),
    })
}

fn capture_corner_radius(source: &SourceNode) -> Option<CornerRadius> {
    if let Some([tl, tr, br, bl]) = source.rectangle_corner_radii {
        Some(CornerRadius {
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        })
    } else {
        source.corner_radius.map(CornerRadius::uniform)
    }
}

/// Per-axis sizing intent from the root node's sizing modes.
pub(crate) fn layout_intent(root: &SourceNode) -> LayoutIntent {
    LayoutIntent {
        horizontal: sizing_intent(root.layout_sizing_horizontal, root),
        vertical: sizing_intent(root.layout_sizing_vertical, root),
    }
}

fn sizing_intent(sizing: Option<LayoutSizing>, root: &SourceNode) -> SizingIntent {
    match sizing {
        Some(LayoutSizing::Fixed) => SizingIntent::Fixed,
        Some(LayoutSizing::Fill) => SizingIntent::Fluid,
        Some(LayoutSizing::Hug) => SizingIntent::Intrinsic,
        None if root.absolute_bounding_box.is_some() => SizingIntent::Fixed,
        None => SizingIntent::Intrinsic,
    }
}

/// Scan the source tree for features the stylesheet will need CSS
/// workarounds for.
pub(crate) fn css_hints(root: &SourceNode) -> CssHints {
    let mut hints = CssHints::default();
    scan_hints(root, &mut hints);
    hints
}

fn scan_hints(node: &SourceNode, hints: &mut CssHints) {
    if !node.is_visible() {
        return;
    }

    if node.is_mask == Some(true) {
        hints.needs_mask = true;
    }

    let visible_fills = node
        .fills
        .iter()
        .filter(|f| f.visible != Some(false))
        .count();
    let has_inner_shadow = node.effects.iter().any(|e| {
        e.visible != Some(false) && e.effect_type.eq_ignore_ascii_case("INNER_SHADOW")
    });
    if visible_fills > 1 || has_inner_shadow {
        hints.needs_pseudo_element = true;
    }

    let has_blur = node.effects.iter().any(|e| {
        e.visible != Some(false)
            && matches!(
                e.effect_type.to_ascii_uppercase().as_str(),
                "LAYER_BLUR" | "BACKGROUND_BLUR"
            )
    });
    let unsupported_blend = node
        .blend_mode
        .map(|mode: BlendMode| mode.to_css().is_none())
        .unwrap_or(false);
    if has_blur || unsupported_blend {
        hints.needs_filter_workaround = true;
    }

    for child in &node.children {
        scan_hints(child, hints);
    }
}
