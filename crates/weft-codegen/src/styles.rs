//! Stylesheet rendering.
//!
//! One base rule for the component root, custom properties for the
//! tokens the component references, one reserved empty rule per variant
//! and per detected state, and the fixed disabled-state rules. Paint
//! features CSS cannot express directly (angular and diamond gradients,
//! linear burn/dodge blending) degrade to documented workarounds.

use weft_core::{format_scalar, Color, Effect, EffectKind, Gradient, GradientKind, Paint};
use weft_extract::{SemanticState, SizingIntent, StructuralIr};
use weft_analyze::InteractionModel;
use weft_tokens::TokenIr;

use crate::naming::{css_ident, modifier_class};
use crate::StyleTokenLookup;

/// Render the stylesheet artifact.
pub(crate) fn render_styles(
    class: &str,
    irs: &StructuralIr,
    irt: &TokenIr,
    iml: &InteractionModel,
    tokens: &StyleTokenLookup,
) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(block) = custom_properties(irt) {
        blocks.push(block);
    }
    blocks.push(base_rule(class, irs, tokens));

    for entry in &irs.variants.entries {
        blocks.push(format!(
            "/* variant: {} */\n.{} {{\n}}",
            entry.name,
            modifier_class(class, &entry.name)
        ));
    }

    for spec in &iml.states {
        match spec.state {
            SemanticState::Default | SemanticState::Disabled => continue,
            SemanticState::Custom => {
                blocks.push(format!(".{}[data-state='custom'] {{\n}}", class));
            }
            _ => blocks.push(format!(".{}{} {{\n}}", class, spec.trigger)),
        }
    }

    blocks.push(format!(
        ".{class}:disabled,\n.{class}[aria-disabled='true'] {{\n  opacity: 0.5;\n  cursor: not-allowed;\n}}",
        class = class
    ));

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

/// `:root` block declaring the tokens this component references.
fn custom_properties(irt: &TokenIr) -> Option<String> {
    if irt.usage.is_empty() {
        return None;
    }

    let mut lines = vec![":root {".to_string()];
    for name in irt.usage.keys() {
        let Some(token) = irt.tokens.get(name) else { continue };
        if token.default_value.is_unresolved() {
            lines.push(format!("  /* {}: unresolved alias */", name));
        } else {
            lines.push(format!(
                "  --{}: {};",
                css_ident(name),
                token.default_value.to_css()
            ));
        }
    }
    lines.push("}".to_string());
    Some(lines.join("\n"))
}

fn base_rule(class: &str, irs: &StructuralIr, tokens: &StyleTokenLookup) -> String {
    let mut lines = vec![format!(".{} {{", class)];
    let root = irs.tree.root_node();

    if let Some(layout) = root.and_then(|r| r.layout.as_ref()) {
        lines.push("  display: flex;".to_string());
        lines.push(format!("  flex-direction: {};", layout.axis.to_css()));
        lines.push(format!("  align-items: {};", layout.cross_align.to_css()));
        lines.push(format!("  justify-content: {};", layout.main_align.to_css()));
        if layout.gap > 0.0 {
            lines.push(format!("  gap: {}px;", format_scalar(layout.gap)));
        }
        let p = layout.padding;
        if p.is_uniform() {
            if p.left > 0.0 {
                lines.push(format!("  padding: {}px;", format_scalar(p.left)));
            }
        } else {
            lines.push(format!(
                "  padding: {}px {}px {}px {}px;",
                format_scalar(p.top),
                format_scalar(p.right),
                format_scalar(p.bottom),
                format_scalar(p.left)
            ));
        }
    }

    if let Some(bounds) = root.and_then(|r| r.bounds) {
        if irs.layout_intent.horizontal == SizingIntent::Fixed {
            lines.push(format!("  width: {}px;", format_scalar(bounds.width)));
        }
        if irs.layout_intent.vertical == SizingIntent::Fixed {
            lines.push(format!("  height: {}px;", format_scalar(bounds.height)));
        }
    }
    if irs.layout_intent.horizontal == SizingIntent::Fluid {
        lines.push("  width: 100%;".to_string());
    }

    if let Some(root) = root {
        lines.extend(background_lines(&root.fills, tokens));

        if let Some(radius) = &root.corner_radius {
            lines.push(format!("  border-radius: {};", radius.to_css()));
        }
        if let Some(opacity) = root.opacity.filter(|o| *o < 1.0) {
            lines.push(format!("  opacity: {};", format_scalar(opacity)));
        }

        lines.extend(effect_lines(&root.effects));

        if root.blend_mode.needs_isolation() {
            match root.blend_mode.to_css() {
                Some(value) => lines.push(format!("  mix-blend-mode: {};", value)),
                None => lines.push(format!(
                    "  mix-blend-mode: {}; /* {} approximated */",
                    root.blend_mode.css_fallback(),
                    format!("{:?}", root.blend_mode).to_lowercase()
                )),
            }
            lines.push("  isolation: isolate;".to_string());
        }
    }

    lines.push("}".to_string());
    lines.join("\n")
}

/// Background declarations for the root paint stack.
fn background_lines(fills: &[Paint], tokens: &StyleTokenLookup) -> Vec<String> {
    match fills {
        [] => Vec::new(),
        [Paint::Solid { color, .. }] => {
            vec![format!("  background: {};", solid_css(color, tokens))]
        }
        [Paint::Gradient(gradient)] => {
            let mut lines = Vec::new();
            if matches!(gradient.kind, GradientKind::Angular | GradientKind::Diamond) {
                lines.push(format!(
                    "  /* {:?} gradient approximated */",
                    gradient.kind
                ));
            }
            lines.push(format!("  background-image: {};", gradient_css(gradient)));
            lines
        }
        [Paint::Image { image_ref, .. }] => vec![
            format!("  background-image: url({});", image_ref),
            "  background-size: cover;".to_string(),
        ],
        layers => {
            // Layered paint: every layer becomes a background-image entry,
            // solids via a two-stop gradient.
            let images: Vec<String> = layers
                .iter()
                .rev()
                .map(|layer| match layer {
                    Paint::Solid { color, .. } => {
                        let css = solid_css(color, tokens);
                        format!("linear-gradient({}, {})", css, css)
                    }
                    Paint::Gradient(gradient) => gradient_css(gradient),
                    Paint::Image { image_ref, .. } => format!("url({})", image_ref),
                })
                .collect();
            vec![format!("  background-image: {};", images.join(", "))]
        }
    }
}

fn solid_css(color: &Color, tokens: &StyleTokenLookup) -> String {
    let literal = color.to_css();
    match tokens.resolve(&literal) {
        Some(variable) => format!("var({}, {})", variable, literal),
        None => literal,
    }
}

fn effect_lines(effects: &[Effect]) -> Vec<String> {
    let mut lines = Vec::new();

    let shadows: Vec<String> = effects
        .iter()
        .filter(|e| matches!(e.kind, EffectKind::DropShadow | EffectKind::InnerShadow))
        .map(|e| {
            let (x, y) = e.offset.map(|o| (o.x, o.y)).unwrap_or((0.0, 0.0));
            let color = e
                .color
                .map(|c| c.to_css())
                .unwrap_or_else(|| "rgba(0, 0, 0, 0.25)".to_string());
            let inset = if e.kind == EffectKind::InnerShadow { "inset " } else { "" };
            format!(
                "{}{}px {}px {}px {}px {}",
                inset,
                format_scalar(x),
                format_scalar(y),
                format_scalar(e.radius),
                format_scalar(e.spread.unwrap_or(0.0)),
                color
            )
        })
        .collect();
    if !shadows.is_empty() {
        lines.push(format!("  box-shadow: {};", shadows.join(", ")));
    }

    for effect in effects {
        match effect.kind {
            EffectKind::LayerBlur => {
                lines.push(format!("  filter: blur({}px);", format_scalar(effect.radius)))
            }
            EffectKind::BackgroundBlur => lines.push(format!(
                "  backdrop-filter: blur({}px);",
                format_scalar(effect.radius)
            )),
            _ => {}
        }
    }

    lines
}

/// CSS gradient image for one gradient paint.
///
/// Angular gradients map to `conic-gradient`; diamond gradients have no
/// CSS equivalent and approximate as a centered radial.
pub(crate) fn gradient_css(gradient: &Gradient) -> String {
    let stops: Vec<String> = gradient
        .stops
        .iter()
        .map(|stop| {
            format!(
                "{} {}%",
                stop.color.to_css(),
                format_scalar(stop.position * 100.0)
            )
        })
        .collect();
    let stops = stops.join(", ");

    match gradient.kind {
        GradientKind::Linear => {
            format!("linear-gradient({}deg, {})", gradient_angle(gradient), stops)
        }
        GradientKind::Angular => {
            format!("conic-gradient(from {}deg, {})", gradient_angle(gradient), stops)
        }
        GradientKind::Radial => format!("radial-gradient(circle, {})", stops),
        GradientKind::Diamond => {
            format!("radial-gradient(50% 50% at 50% 50%, {})", stops)
        }
    }
}

/// CSS angle of the gradient axis, from the placement transform.
fn gradient_angle(gradient: &Gradient) -> String {
    let angle = match gradient.transform {
        Some(m) => {
            let (x, y) = (m[0][0], m[1][0]);
            let mut degrees = y.atan2(x).to_degrees() + 90.0;
            while degrees < 0.0 {
                degrees += 360.0;
            }
            (degrees % 360.0 * 100.0).round() / 100.0
        }
        None => 180.0,
    };
    format_scalar(angle)
}
