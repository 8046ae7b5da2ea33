//! Inline SVG rendering for vector geometry and text-on-path nodes.

use weft_core::{format_scalar, Gradient, GradientKind, Paint};
use weft_extract::IrNode;

use crate::naming::{css_ident, escape_jsx_text};

/// Render a vector node as an inline SVG block.
pub(crate) fn render_svg(node: &IrNode, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let class = css_ident(&node.name);
    let mut lines = Vec::new();

    let (view_w, view_h) = node
        .bounds
        .map(|b| (b.width.max(1.0), b.height.max(1.0)))
        .unwrap_or((24.0, 24.0));

    lines.push(format!("{}<svg", pad));
    lines.push(format!("{}  className=\"{}\"", pad, class));
    if let Some(bounds) = node.bounds {
        lines.push(format!("{}  width={{{}}}", pad, format_scalar(bounds.width)));
        lines.push(format!("{}  height={{{}}}", pad, format_scalar(bounds.height)));
    }
    lines.push(format!(
        "{}  viewBox=\"0 0 {} {}\"",
        pad,
        format_scalar(view_w),
        format_scalar(view_h)
    ));
    lines.push(format!("{}  fill=\"none\"", pad));
    lines.push(format!("{}  xmlns=\"http://www.w3.org/2000/svg\"", pad));
    lines.push(format!("{}  aria-hidden=\"true\"", pad));
    lines.push(format!("{}>", pad));

    // Gradient fills need defs with stable, name-derived ids.
    let gradients: Vec<&Gradient> = node
        .fills
        .iter()
        .filter_map(|paint| match paint {
            Paint::Gradient(gradient) => Some(gradient),
            _ => None,
        })
        .collect();
    if !gradients.is_empty() {
        lines.push(format!("{}  <defs>", pad));
        for (index, gradient) in gradients.iter().enumerate() {
            lines.extend(gradient_def(gradient, &class, index, indent + 4));
        }
        lines.push(format!("{}  </defs>", pad));
    }

    let fill = fill_attr(node, &class);
    let stroke = node.strokes.first().and_then(|s| {
        s.paint
            .as_solid()
            .map(|color| (color.to_css(), s.weight))
    });

    for path in &node.vector_paths {
        let mut attrs = format!("d=\"{}\" fill=\"{}\"", path.data, fill);
        match path.winding_rule.as_deref() {
            Some("EVENODD") => attrs.push_str(" fillRule=\"evenodd\""),
            Some("NONZERO") => attrs.push_str(" fillRule=\"nonzero\""),
            _ => {}
        }
        if let Some((ref stroke_color, weight)) = stroke {
            attrs.push_str(&format!(
                " stroke=\"{}\" strokeWidth={{{}}}",
                stroke_color,
                format_scalar(weight)
            ));
        }
        lines.push(format!("{}  <path {} />", pad, attrs));
    }

    lines.push(format!("{}</svg>", pad));
    lines
}

fn fill_attr(node: &IrNode, class: &str) -> String {
    match node.fills.first() {
        Some(Paint::Solid { color, .. }) => color.to_css(),
        Some(Paint::Gradient(_)) => format!("url(#{}-gradient-0)", class),
        _ => "currentColor".to_string(),
    }
}

fn gradient_def(gradient: &Gradient, class: &str, index: usize, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let id = format!("{}-gradient-{}", class, index);
    let element = match gradient.kind {
        GradientKind::Linear => "linearGradient",
        // SVG has no angular/diamond primitives; radial is the nearest.
        GradientKind::Radial | GradientKind::Angular | GradientKind::Diamond => "radialGradient",
    };

    let transform = gradient
        .transform
        .map(|m| {
            format!(
                " gradientTransform=\"matrix({} {} {} {} {} {})\"",
                format_scalar(m[0][0]),
                format_scalar(m[1][0]),
                format_scalar(m[0][1]),
                format_scalar(m[1][1]),
                format_scalar(m[0][2]),
                format_scalar(m[1][2])
            )
        })
        .unwrap_or_default();

    let mut lines = vec![format!("{}<{} id=\"{}\"{}>", pad, element, id, transform)];
    for stop in &gradient.stops {
        let mut attrs = format!(
            "offset=\"{}%\" stopColor=\"{}\"",
            format_scalar(stop.position * 100.0),
            stop.color.to_hex()
        );
        if stop.color.a < 1.0 {
            attrs.push_str(&format!(" stopOpacity={{{}}}", format_scalar(stop.color.a)));
        }
        lines.push(format!("{}  <stop {} />", pad, attrs));
    }
    lines.push(format!("{}</{}>", pad, element));
    lines
}

/// Render a text node whose characters follow a curve.
///
/// Falls back to plain text rendering when the curve data is absent.
pub(crate) fn render_text_on_path(node: &IrNode, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let class = css_ident(&node.name);
    let text = escape_jsx_text(node.text.as_deref().unwrap_or(""));

    let Some(text_path) = node.text_path.as_ref().filter(|t| !t.path.is_empty()) else {
        return vec![format!("{}<span className=\"{}\">{}</span>", pad, class, text)];
    };

    let (view_w, view_h) = node
        .bounds
        .map(|b| (b.width.max(1.0), b.height.max(1.0)))
        .unwrap_or((100.0, 100.0));
    let curve_id = format!("{}-curve", class);

    vec![
        format!("{}<svg", pad),
        format!("{}  className=\"{}\"", pad, class),
        format!(
            "{}  viewBox=\"0 0 {} {}\"",
            pad,
            format_scalar(view_w),
            format_scalar(view_h)
        ),
        format!("{}  xmlns=\"http://www.w3.org/2000/svg\"", pad),
        format!("{}>", pad),
        format!("{}  <defs>", pad),
        format!(
            "{}    <path id=\"{}\" d=\"{}\" fill=\"none\" />",
            pad, curve_id, text_path.path
        ),
        format!("{}  </defs>", pad),
        format!("{}  <text className=\"{}-text\">", pad, class),
        format!(
            "{}    <textPath href=\"#{}\" startOffset=\"{}%\">",
            pad,
            curve_id,
            format_scalar(text_path.start_offset)
        ),
        format!("{}      {}", pad, text),
        format!("{}    </textPath>", pad),
        format!("{}  </text>", pad),
        format!("{}</svg>", pad),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{Color, GradientStop, Rect};
    use weft_extract::{TextPath, VectorPath};

    fn vector_node() -> IrNode {
        IrNode {
            name: "Chevron icon".into(),
            node_type: "VECTOR".into(),
            bounds: Some(Rect::new(0.0, 0.0, 16.0, 16.0)),
            fills: vec![Paint::Solid {
                color: Color::rgb(0.0, 0.0, 0.0),
                opacity: 1.0,
            }],
            vector_paths: vec![VectorPath {
                data: "M4 6L8 10L12 6".into(),
                winding_rule: Some("EVENODD".into()),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_svg_solid_fill() {
        let lines = render_svg(&vector_node(), 0).join("\n");
        assert!(lines.contains("viewBox=\"0 0 16 16\""));
        assert!(lines.contains("<path d=\"M4 6L8 10L12 6\" fill=\"#000000\""));
        assert!(lines.contains("fillRule=\"evenodd\""));
        assert!(lines.contains("aria-hidden=\"true\""));
    }

    #[test]
    fn test_render_svg_gradient_fill() {
        let mut node = vector_node();
        node.fills = vec![Paint::Gradient(Gradient {
            kind: GradientKind::Linear,
            stops: vec![
                GradientStop { position: 0.0, color: Color::rgb(1.0, 0.0, 0.0) },
                GradientStop { position: 1.0, color: Color::rgb(0.0, 0.0, 1.0) },
            ],
            transform: Some([[0.0, 1.0, 0.0], [-1.0, 0.0, 1.0]]),
            style_ref: None,
        })];

        let lines = render_svg(&node, 0).join("\n");
        assert!(lines.contains("<linearGradient id=\"chevron-icon-gradient-0\""));
        assert!(lines.contains("gradientTransform=\"matrix(0 -1 1 0 0 1)\""));
        assert!(lines.contains("fill=\"url(#chevron-icon-gradient-0)\""));
        assert!(lines.contains("stopColor=\"#ff0000\""));
    }

    #[test]
    fn test_text_on_path() {
        let node = IrNode {
            name: "Arc label".into(),
            node_type: "TEXT".into(),
            text: Some("Curved".into()),
            text_path: Some(TextPath {
                path: "M0 50A50 50 0 0 1 100 50".into(),
                start_offset: 25.0,
            }),
            ..Default::default()
        };

        let lines = render_text_on_path(&node, 0).join("\n");
        assert!(lines.contains("<textPath href=\"#arc-label-curve\" startOffset=\"25%\">"));
        assert!(lines.contains("Curved"));
    }

    #[test]
    fn test_text_on_path_falls_back_to_plain_text() {
        let node = IrNode {
            name: "Arc label".into(),
            node_type: "TEXT".into(),
            text: Some("Flat".into()),
            text_path: None,
            ..Default::default()
        };

        let lines = render_text_on_path(&node, 2);
        assert_eq!(lines, vec!["  <span className=\"arc-label\">Flat</span>"]);
    }
}
