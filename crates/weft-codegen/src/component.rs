//! Component source rendering.
//!
//! Dispatches on the archetype to one of five node-tree templates.
//! Event bindings are emitted exactly for the interaction rules present
//! in the interaction model; children render from the structural
//! sub-tree first, then from named slots, then from a `{children}`
//! placeholder.

use indexmap::IndexMap;
use serde_json::json;

use weft_analyze::{Archetype, InteractionModel};
use weft_extract::StructuralIr;

use crate::error::Result;
use crate::markup::MarkupRenderer;
use crate::naming::{css_ident, prop_ident};
use crate::props::{self, PropSet};
use crate::templates::TemplateEngine;
use crate::StyleTokenLookup;

/// The five component templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    Button,
    Input,
    Listbox,
    Dialog,
    Container,
}

impl Template {
    /// Unexpected archetypes fail closed to the generic container.
    fn for_archetype(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Button | Archetype::IconButton => Self::Button,
            Archetype::Input | Archetype::Textarea => Self::Input,
            Archetype::Select | Archetype::Combobox | Archetype::Menu => Self::Listbox,
            Archetype::Dialog => Self::Dialog,
            _ => Self::Container,
        }
    }
}

/// Render the component source artifact.
pub(crate) fn render_component(
    ident: &str,
    class: &str,
    irs: &StructuralIr,
    iml: &InteractionModel,
    tokens: &StyleTokenLookup,
    engine: &TemplateEngine,
) -> Result<String> {
    let template = Template::for_archetype(iml.archetype);
    let set = props::prop_set(irs, iml);
    let transient = transient_state_names(iml);
    let internal_open = template == Template::Listbox;
    let track_hover = iml
        .rules
        .iter()
        .any(|r| r.condition.as_deref() == Some("!hovering"));

    let mut out = engine.render(
        "component_header",
        &json!({ "component": ident, "stylesheet": class }),
    )?;
    out.push('\n');

    let mut lines = Vec::new();
    lines.push("/**".to_string());
    lines.push(format!(" * {} — generated from '{}'.", ident, irs.meta.name));
    if let Some(url) = &irs.meta.source_url {
        lines.push(format!(" * Source: {}", url));
    }
    lines.push(" */".to_string());
    lines.push(format!(
        "export function {}({}: {}Props) {{",
        ident,
        props::destructure(&set),
        ident
    ));

    let mut hooks = Vec::new();
    if !transient.is_empty() {
        let union = std::iter::once("'default'".to_string())
            .chain(transient.iter().map(|s| format!("'{}'", s)))
            .collect::<Vec<_>>()
            .join(" | ");
        hooks.push(format!(
            "  const [interactionState, setInteractionState] = React.useState<{}>('default');",
            union
        ));
    }
    if internal_open {
        hooks.push("  const [open, setOpen] = React.useState(false);".to_string());
    }
    if track_hover {
        hooks.push("  const hoveringRef = React.useRef(false);".to_string());
    }
    if !hooks.is_empty() {
        lines.extend(hooks);
        lines.push(String::new());
    }

    let handlers = build_handlers(iml, internal_open, track_hover);
    for (event, statements) in &handlers {
        lines.push(format!("  const {} = () => {{", handler_name(event)));
        for statement in statements {
            lines.push(format!("    {}", statement));
        }
        lines.push("  };".to_string());
        lines.push(String::new());
    }

    if !iml.keyboard.is_empty() {
        lines.extend(keyboard_handler(iml, internal_open));
        lines.push(String::new());
    }

    lines.extend(render_jsx(template, class, irs, iml, &set, &handlers, tokens));
    lines.push("}".to_string());

    out.push_str(&lines.join("\n"));
    out.push('\n');
    Ok(out)
}

/// Transient state names, in rule order, that need a `useState` union.
fn transient_state_names(iml: &InteractionModel) -> Vec<String> {
    let mut names = Vec::new();
    for rule in &iml.rules {
        if rule.action == "setState" {
            if let Some(target) = &rule.target {
                if !names.contains(target) {
                    names.push(target.clone());
                }
            }
        }
    }
    names
}

/// Statement lists per DOM event, from the interaction rules.
fn build_handlers(
    iml: &InteractionModel,
    internal_open: bool,
    track_hover: bool,
) -> IndexMap<String, Vec<String>> {
    let mut handlers: IndexMap<String, Vec<String>> = IndexMap::new();

    if track_hover {
        handlers
            .entry("mouseenter".to_string())
            .or_default()
            .push("hoveringRef.current = true;".to_string());
        handlers
            .entry("mouseleave".to_string())
            .or_default()
            .push("hoveringRef.current = false;".to_string());
    }

    for rule in &iml.rules {
        // `activate` binds the onClick prop directly; no wrapper needed.
        if rule.action == "activate" {
            continue;
        }
        let statements = handlers.entry(rule.event.clone()).or_default();
        match rule.action.as_str() {
            "open" => {
                if internal_open {
                    statements.push("setOpen(true);".to_string());
                }
                statements.push("onOpenChange?.(true);".to_string());
            }
            "close" => {
                if rule.condition.as_deref() == Some("!hovering") {
                    statements.push("if (hoveringRef.current) {".to_string());
                    statements.push("  return;".to_string());
                    statements.push("}".to_string());
                }
                if internal_open {
                    statements.push("setOpen(false);".to_string());
                }
                statements.push("onOpenChange?.(false);".to_string());
            }
            "setState" => statements.push(format!(
                "setInteractionState('{}');",
                rule.target.as_deref().unwrap_or("default")
            )),
            "clearState" => statements.push("setInteractionState('default');".to_string()),
            other => statements.push(format!("// {}", other)),
        }
    }

    handlers.retain(|_, statements| !statements.is_empty());
    handlers
}

fn keyboard_handler(iml: &InteractionModel, internal_open: bool) -> Vec<String> {
    let mut lines = vec![
        "  const handleKeyDown = (event: React.KeyboardEvent<HTMLElement>) => {".to_string(),
        "    switch (event.key) {".to_string(),
    ];

    for binding in &iml.keyboard {
        lines.push(format!("      case '{}': {{", binding.key));
        if binding.prevent_default {
            lines.push("        event.preventDefault();".to_string());
        }
        for statement in action_statements(&binding.action, internal_open) {
            lines.push(format!("        {}", statement));
        }
        lines.push("        break;".to_string());
        lines.push("      }".to_string());
    }

    lines.push("      default:".to_string());
    lines.push("        break;".to_string());
    lines.push("    }".to_string());
    lines.push("  };".to_string());
    lines
}

fn action_statements(action: &str, internal_open: bool) -> Vec<String> {
    match action {
        "activate" | "toggle" => vec!["onClick?.(event);".to_string()],
        "open" => {
            let mut statements = Vec::new();
            if internal_open {
                statements.push("setOpen(true);".to_string());
            }
            statements.push("onOpenChange?.(true);".to_string());
            statements
        }
        "close" => {
            let mut statements = Vec::new();
            if internal_open {
                statements.push("setOpen(false);".to_string());
            }
            statements.push("onOpenChange?.(false);".to_string());
            statements
        }
        "trapFocus" => vec!["// focus stays within the dialog surface".to_string()],
        other => vec![format!("// {}", other)],
    }
}

fn handler_name(event: &str) -> String {
    format!("handle{}", pascal_event(event))
}

fn pascal_event(event: &str) -> &'static str {
    match event {
        "mouseenter" => "MouseEnter",
        "mouseleave" => "MouseLeave",
        "mousedown" => "MouseDown",
        "mouseup" => "MouseUp",
        "focus" => "Focus",
        "blur" => "Blur",
        "click" => "Click",
        _ => "Event",
    }
}

fn event_attr(event: &str) -> Option<&'static str> {
    match event {
        "click" => Some("onClick"),
        "mouseenter" => Some("onMouseEnter"),
        "mouseleave" => Some("onMouseLeave"),
        "mousedown" => Some("onMouseDown"),
        "mouseup" => Some("onMouseUp"),
        "focus" => Some("onFocus"),
        "blur" => Some("onBlur"),
        _ => None,
    }
}

/// Attributes shared by every template's interactive root.
fn common_attrs(
    set: &PropSet,
    iml: &InteractionModel,
    handlers: &IndexMap<String, Vec<String>>,
    has_transient: bool,
) -> Vec<String> {
    let mut attrs = Vec::new();

    for variant in &set.variants {
        attrs.push(format!(
            "data-{}={{{}}}",
            css_ident(&variant.source_key),
            variant.ident
        ));
    }
    if has_transient {
        attrs.push("data-interaction={interactionState}".to_string());
    }
    if set.has_aria_label {
        attrs.push("aria-label={ariaLabel}".to_string());
    }
    if let Some(labelled_by) = &iml.accessibility.labelled_by {
        attrs.push(format!("aria-labelledby=\"{}\"", labelled_by));
    }
    if let Some(described_by) = &iml.accessibility.described_by {
        attrs.push(format!("aria-describedby=\"{}\"", described_by));
    }
    for event in handlers.keys() {
        if let Some(attr) = event_attr(event) {
            attrs.push(format!("{}={{{}}}", attr, handler_name(event)));
        }
    }
    if !iml.keyboard.is_empty() {
        attrs.push("onKeyDown={handleKeyDown}".to_string());
    }

    attrs
}

/// Children of the root, falling back to slots, then to `{children}`.
fn body_lines(irs: &StructuralIr, tokens: &StyleTokenLookup, indent: usize) -> Vec<String> {
    let renderer = MarkupRenderer::new(&irs.tree, tokens);
    let body = renderer.render_root_children(indent);
    if !body.is_empty() {
        return body;
    }

    let pad = " ".repeat(indent);
    if !irs.slots.is_empty() {
        return irs
            .slots
            .iter()
            .map(|slot| format!("{}{{{}}}", pad, prop_ident(&slot.name)))
            .collect();
    }
    vec![format!("{}{{children}}", pad)]
}

fn open_element(lines: &mut Vec<String>, indent: usize, tag: &str, attrs: Vec<String>) {
    let pad = " ".repeat(indent);
    lines.push(format!("{}<{}", pad, tag));
    for attr in attrs {
        lines.push(format!("{}  {}", pad, attr));
    }
    lines.push(format!("{}>", pad));
}

fn render_jsx(
    template: Template,
    class: &str,
    irs: &StructuralIr,
    iml: &InteractionModel,
    set: &PropSet,
    handlers: &IndexMap<String, Vec<String>>,
    tokens: &StyleTokenLookup,
) -> Vec<String> {
    let has_transient = iml.rules.iter().any(|r| r.action == "setState");
    let mut lines = Vec::new();

    match template {
        Template::Button => {
            lines.push("  return (".to_string());
            let mut attrs = vec![
                "type=\"button\"".to_string(),
                format!("className=\"{}\"", class),
            ];
            attrs.extend(common_attrs(set, iml, handlers, has_transient));
            if set.has_disabled {
                attrs.push("disabled={disabled}".to_string());
            }
            if set.has_on_click {
                attrs.push("onClick={onClick}".to_string());
            }
            open_element(&mut lines, 4, "button", attrs);
            lines.extend(body_lines(irs, tokens, 6));
            lines.push("    </button>".to_string());
            lines.push("  );".to_string());
        }
        Template::Input => {
            lines.push("  return (".to_string());
            lines.push(format!("    <div className=\"{}\">", class));
            lines.extend(body_lines(irs, tokens, 6));
            let mut attrs = vec![
                format!("id=\"{}-control\"", class),
                format!("className=\"{}-control\"", class),
                "type=\"text\"".to_string(),
            ];
            attrs.extend(common_attrs(set, iml, handlers, has_transient));
            if set.has_disabled {
                attrs.push("disabled={disabled}".to_string());
            }
            let pad = "      ";
            lines.push(format!("{}<input", pad));
            for attr in attrs {
                lines.push(format!("{}  {}", pad, attr));
            }
            lines.push(format!("{}/>", pad));
            lines.push("    </div>".to_string());
            lines.push("  );".to_string());
        }
        Template::Listbox => {
            lines.push("  return (".to_string());
            lines.push(format!("    <div className=\"{}\">", class));
            let mut attrs = vec![
                "type=\"button\"".to_string(),
                format!("className=\"{}-trigger\"", class),
                format!(
                    "role=\"{}\"",
                    iml.accessibility.role.as_deref().unwrap_or("combobox")
                ),
                "aria-expanded={open}".to_string(),
                "aria-haspopup=\"listbox\"".to_string(),
            ];
            if let Some(controls) = &iml.accessibility.controls {
                attrs.push(format!("aria-controls=\"{}\"", controls));
            } else {
                attrs.push(format!("aria-controls=\"{}-listbox\"", class));
            }
            attrs.extend(common_attrs(set, iml, handlers, has_transient));
            if set.has_disabled {
                attrs.push("disabled={disabled}".to_string());
            }
            open_element(&mut lines, 6, "button", attrs);
            lines.extend(body_lines(irs, tokens, 8));
            lines.push("      </button>".to_string());
            lines.push("      {open ? (".to_string());
            let listbox_id = iml
                .accessibility
                .controls
                .clone()
                .unwrap_or_else(|| format!("{}-listbox", class));
            lines.push(format!(
                "        <div id=\"{}\" role=\"listbox\" className=\"{}-listbox\">",
                listbox_id, class
            ));
            lines.push("          {children}".to_string());
            lines.push("        </div>".to_string());
            lines.push("      ) : null}".to_string());
            lines.push("    </div>".to_string());
            lines.push("  );".to_string());
        }
        Template::Dialog => {
            lines.push("  return open ? (".to_string());
            lines.push(format!(
                "    <div className=\"{}-backdrop\" onClick={{() => onOpenChange?.(false)}}>",
                class
            ));
            let mut attrs = vec![
                "role=\"dialog\"".to_string(),
                "aria-modal=\"true\"".to_string(),
                format!("className=\"{}\"", class),
            ];
            attrs.extend(common_attrs(set, iml, handlers, has_transient));
            attrs.push("onClick={(event) => event.stopPropagation()}".to_string());
            open_element(&mut lines, 6, "div", attrs);
            lines.extend(body_lines(irs, tokens, 8));
            lines.push("      </div>".to_string());
            lines.push("    </div>".to_string());
            lines.push("  ) : null;".to_string());
        }
        Template::Container => {
            lines.push("  return (".to_string());
            let mut attrs = vec![format!("className=\"{}\"", class)];
            if let Some(role) = &iml.accessibility.role {
                attrs.push(format!("role=\"{}\"", role));
            }
            attrs.extend(common_attrs(set, iml, handlers, has_transient));
            if set.has_disabled {
                attrs.push("aria-disabled={disabled}".to_string());
            }
            open_element(&mut lines, 4, "div", attrs);
            lines.extend(body_lines(irs, tokens, 6));
            lines.push("    </div>".to_string());
            lines.push("  );".to_string());
        }
    }

    lines
}
