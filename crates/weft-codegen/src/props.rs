//! Prop-set derivation and the type-declaration artifact.
//!
//! The prop set is computed once and shared by the types renderer and
//! the component renderer, so the interface block and the destructuring
//! pattern can never drift apart.

use weft_analyze::{Archetype, InteractionModel};
use weft_extract::{SemanticState, StructuralIr};

use crate::naming::{escape_ts_string, prop_ident};

/// One variant-driven prop: camelCase identifier, observed literal
/// values, and the original property key.
#[derive(Debug, Clone)]
pub(crate) struct VariantProp {
    pub ident: String,
    pub values: Vec<String>,
    pub source_key: String,
}

/// The complete prop surface of one generated component.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropSet {
    pub variants: Vec<VariantProp>,
    pub slots: Vec<String>,
    pub has_disabled: bool,
    pub has_open: bool,
    pub has_on_click: bool,
    pub has_on_open_change: bool,
    pub has_aria_label: bool,
}

pub(crate) fn prop_set(irs: &StructuralIr, iml: &InteractionModel) -> PropSet {
    let variants = irs
        .variants
        .property_values()
        .into_iter()
        .map(|(key, values)| VariantProp {
            ident: prop_ident(&key),
            values,
            source_key: key,
        })
        .collect();

    let slots = irs.slots.iter().map(|s| prop_ident(&s.name)).collect();

    let has_disabled = iml.has_state(SemanticState::Disabled);
    // Listbox-shaped archetypes manage `open` internally; only the
    // prop-driven overlays expose it.
    let has_open = matches!(
        iml.archetype,
        Archetype::Dialog | Archetype::Popover | Archetype::Tooltip
    );
    let has_on_click = iml.rules.iter().any(|r| r.action == "activate")
        || iml
            .keyboard
            .iter()
            .any(|k| k.action == "activate" || k.action == "toggle");
    let has_on_open_change = iml
        .rules
        .iter()
        .any(|r| r.action == "open" || r.action == "close")
        || iml
            .keyboard
            .iter()
            .any(|k| k.action == "open" || k.action == "close");
    let has_aria_label =
        iml.accessibility.label.is_some() || iml.accessibility.labelled_by.is_some();

    PropSet {
        variants,
        slots,
        has_disabled,
        has_open,
        has_on_click,
        has_on_open_change,
        has_aria_label,
    }
}

/// Render the type-declaration artifact.
pub(crate) fn render_types(ident: &str, set: &PropSet) -> String {
    let mut lines = Vec::new();

    lines.push("import type * as React from 'react';".to_string());
    lines.push(String::new());
    lines.push(format!("/** Props for the {} component. */", ident));
    lines.push(format!("export interface {}Props {{", ident));

    for variant in &set.variants {
        let union = variant
            .values
            .iter()
            .map(|v| format!("'{}'", escape_ts_string(v)))
            .collect::<Vec<_>>()
            .join(" | ");
        lines.push(format!(
            "  /** Observed values for the `{}` variant property. */",
            variant.source_key
        ));
        lines.push(format!("  {}?: {};", variant.ident, union));
    }

    for slot in &set.slots {
        lines.push(format!("  /** Content for the `{}` slot. */", slot));
        lines.push(format!("  {}?: React.ReactNode;", slot));
    }

    if set.has_disabled {
        lines.push("  /** Disables interaction and applies disabled styling. */".to_string());
        lines.push("  disabled?: boolean;".to_string());
    }
    if set.has_open {
        lines.push("  /** Whether the floating surface is open. */".to_string());
        lines.push("  open?: boolean;".to_string());
    }
    if set.has_aria_label {
        lines.push("  'aria-label'?: string;".to_string());
    }
    if set.has_on_click {
        lines.push("  onClick?: (event: React.SyntheticEvent<HTMLElement>) => void;".to_string());
    }
    if set.has_on_open_change {
        lines.push("  onOpenChange?: (open: boolean) => void;".to_string());
    }
    lines.push("  children?: React.ReactNode;".to_string());

    lines.push("}".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Destructuring pattern for the component function signature.
pub(crate) fn destructure(set: &PropSet) -> String {
    let mut parts = Vec::new();

    for variant in &set.variants {
        match variant.values.first() {
            Some(first) => parts.push(format!(
                "{} = '{}'",
                variant.ident,
                escape_ts_string(first)
            )),
            None => parts.push(variant.ident.clone()),
        }
    }
    for slot in &set.slots {
        parts.push(slot.clone());
    }
    if set.has_disabled {
        parts.push("disabled".to_string());
    }
    if set.has_open {
        parts.push("open = false".to_string());
    }
    if set.has_aria_label {
        parts.push("'aria-label': ariaLabel".to_string());
    }
    if set.has_on_click {
        parts.push("onClick".to_string());
    }
    if set.has_on_open_change {
        parts.push("onOpenChange".to_string());
    }
    parts.push("children".to_string());

    format!("{{ {} }}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_analyze::{build_interaction, classify};
    use weft_core::SourceNode;
    use weft_extract::extract;

    fn button_inputs() -> (StructuralIr, InteractionModel) {
        let node: SourceNode = serde_json::from_str(
            r#"{
                "id": "1:1",
                "name": "Button/Primary",
                "type": "COMPONENT",
                "variantProperties": { "state": "hover" },
                "children": [
                    { "id": "1:2", "name": "Label", "type": "TEXT", "characters": "Click me" }
                ]
            }"#,
        )
        .unwrap();
        let irs = extract(&node, None, None);
        let iml = build_interaction(&irs, &classify(&irs));
        (irs, iml)
    }

    #[test]
    fn test_prop_set_for_button() {
        let (irs, iml) = button_inputs();
        let set = prop_set(&irs, &iml);

        assert_eq!(set.variants.len(), 1);
        assert_eq!(set.variants[0].ident, "state");
        assert_eq!(set.variants[0].values, vec!["hover"]);
        assert_eq!(set.slots, vec!["label"]);
        assert!(set.has_on_click);
        assert!(set.has_aria_label);
        assert!(!set.has_open);
    }

    #[test]
    fn test_render_types() {
        let (irs, iml) = button_inputs();
        let types = render_types("ButtonPrimary", &prop_set(&irs, &iml));

        assert!(types.contains("export interface ButtonPrimaryProps {"));
        assert!(types.contains("state?: 'hover';"));
        assert!(types.contains("label?: React.ReactNode;"));
        assert!(types.contains("onClick?: (event: React.SyntheticEvent<HTMLElement>) => void;"));
        assert!(types.contains("children?: React.ReactNode;"));
    }

    #[test]
    fn test_destructure_matches_types() {
        let (irs, iml) = button_inputs();
        let pattern = destructure(&prop_set(&irs, &iml));

        assert_eq!(
            pattern,
            "{ state = 'hover', label, 'aria-label': ariaLabel, onClick, children }"
        );
    }
}
