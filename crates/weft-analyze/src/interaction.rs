//! Interaction-model derivation.
//!
//! Pure function over the structural IR and the classifier verdict.
//! States come from the variant-to-state mapping (a lone `default` is
//! synthesized when none exists), accessibility starts from the
//! classifier's suggestion and is refined by detected slots, and the
//! keyboard map and interaction rules are archetype-driven tables plus
//! one derived rule pair per detected transient state.

use serde::{Deserialize, Serialize};

use weft_extract::{SemanticState, StructuralIr};

use crate::archetype::{Archetype, ComponentIntelligence};

/// One interaction state of the component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSpec {
    pub state: SemanticState,
    /// CSS-level trigger equivalent (`:hover`), empty for `default`.
    pub trigger: String,
    /// Style-change placeholders filled in by hand after generation.
    pub changes: Vec<String>,
    pub aria_deltas: Vec<AriaDelta>,
}

/// An accessibility-attribute change a state applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AriaDelta {
    pub attribute: String,
    pub value: String,
}

/// Accessibility mapping for the component root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessibilityMap {
    pub role: Option<String>,
    pub label: Option<String>,
    pub labelled_by: Option<String>,
    pub described_by: Option<String>,
    pub controls: Option<String>,
    pub expanded: Option<bool>,
    pub disabled: Option<bool>,
}

/// One keyboard binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: String,
    pub target: Option<String>,
    pub prevent_default: bool,
}

/// One event-driven interaction rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRule {
    pub event: String,
    pub action: String,
    pub target: Option<String>,
    pub condition: Option<String>,
}

/// The interaction-model intermediate representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionModel {
    pub archetype: Archetype,
    pub states: Vec<StateSpec>,
    pub accessibility: AccessibilityMap,
    pub keyboard: Vec<KeyBinding>,
    pub rules: Vec<InteractionRule>,
    pub required_primitives: Vec<String>,
}

impl InteractionModel {
    pub fn state(&self, state: SemanticState) -> Option<&StateSpec> {
        self.states.iter().find(|s| s.state == state)
    }

    pub fn has_state(&self, state: SemanticState) -> bool {
        self.state(state).is_some()
    }
}

/// Build the interaction model for one component.
pub fn build_interaction(ir: &StructuralIr, intel: &ComponentIntelligence) -> InteractionModel {
    let states = build_states(ir, intel.archetype);
    let accessibility = build_accessibility(ir, intel);
    let keyboard = keyboard_map(intel.archetype);
    let rules = build_rules(intel.archetype, &states);

    InteractionModel {
        archetype: intel.archetype,
        states,
        accessibility,
        keyboard,
        rules,
        required_primitives: intel.required_primitives.clone(),
    }
}

fn build_states(ir: &StructuralIr, archetype: Archetype) -> Vec<StateSpec> {
    let mut states = vec![state_spec(SemanticState::Default, archetype)];

    for state in ir.mapped_states() {
        if state == SemanticState::Default || states.iter().any(|s| s.state == state) {
            continue;
        }
        states.push(state_spec(state, archetype));
    }

    states
}

fn state_spec(state: SemanticState, archetype: Archetype) -> StateSpec {
    let mut aria_deltas = Vec::new();
    match state {
        SemanticState::Disabled => aria_deltas.push(AriaDelta {
            attribute: "aria-disabled".into(),
            value: "true".into(),
        }),
        SemanticState::Pressed
            if matches!(archetype, Archetype::Button | Archetype::IconButton) =>
        {
            aria_deltas.push(AriaDelta {
                attribute: "aria-pressed".into(),
                value: "true".into(),
            })
        }
        _ => {}
    }

    StateSpec {
        state,
        trigger: state.css_trigger().to_string(),
        changes: Vec::new(),
        aria_deltas,
    }
}

fn build_accessibility(ir: &StructuralIr, intel: &ComponentIntelligence) -> AccessibilityMap {
    let id_stem = element_id_stem(&ir.meta.name);
    let mut map = AccessibilityMap {
        role: intel.suggested_role.clone(),
        ..Default::default()
    };

    if let Some(slot) = ir.slot("label") {
        map.labelled_by = Some(format!("{}-label", id_stem));
        // The label slot's text doubles as the readable label.
        let mut text: Option<String> = None;
        ir.tree.walk(&mut |_, node| {
            if text.is_none() && node.source_id == slot.node_id {
                text = node.text.clone();
            }
        });
        map.label = text;
    }
    if ir.slot("helper").is_some() {
        map.described_by = Some(format!("{}-helper", id_stem));
    }
    if matches!(intel.archetype, Archetype::Combobox | Archetype::Select)
        && (ir.slot("content").is_some() || ir.slots.iter().any(|s| s.name.starts_with("option")))
    {
        map.controls = Some(format!("{}-listbox", id_stem));
    }

    if intel.archetype.has_overlay_surface() {
        map.expanded = Some(false);
    }
    if ir
        .state_mapping
        .iter()
        .any(|m| m.state == SemanticState::Disabled)
    {
        map.disabled = Some(false);
    }

    map
}

/// Lowercase alphanumeric-and-dash stem for generated element ids.
fn element_id_stem(name: &str) -> String {
    let mut stem = String::new();
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            stem.push('-');
            last_dash = true;
        }
    }
    let stem = stem.trim_end_matches('-').to_string();
    if stem.is_empty() {
        "component".to_string()
    } else {
        stem
    }
}

fn keyboard_map(archetype: Archetype) -> Vec<KeyBinding> {
    let bindings: &[(&str, &str, Option<&str>, bool)] = match archetype {
        Archetype::Button | Archetype::IconButton => &[
            ("Enter", "activate", None, true),
            (" ", "activate", None, true),
        ],
        Archetype::Checkbox | Archetype::Switch | Archetype::Radio => {
            &[(" ", "toggle", None, true)]
        }
        Archetype::Select | Archetype::Combobox | Archetype::Menu => &[
            ("Enter", "open", None, false),
            ("Escape", "close", None, false),
            ("ArrowDown", "highlightNext", Some("listbox"), true),
            ("ArrowUp", "highlightPrevious", Some("listbox"), true),
            ("Home", "highlightFirst", Some("listbox"), true),
            ("End", "highlightLast", Some("listbox"), true),
        ],
        Archetype::Dialog | Archetype::Popover => &[
            ("Escape", "close", None, false),
            ("Tab", "trapFocus", None, false),
        ],
        Archetype::Slider => &[
            ("ArrowRight", "increase", None, true),
            ("ArrowUp", "increase", None, true),
            ("ArrowLeft", "decrease", None, true),
            ("ArrowDown", "decrease", None, true),
            ("Home", "setMinimum", None, true),
            ("End", "setMaximum", None, true),
        ],
        Archetype::Tabs => &[
            ("ArrowRight", "nextTab", None, true),
            ("ArrowLeft", "previousTab", None, true),
            ("Home", "firstTab", None, true),
            ("End", "lastTab", None, true),
        ],
        _ => &[],
    };

    bindings
        .iter()
        .map(|(key, action, target, prevent_default)| KeyBinding {
            key: key.to_string(),
            action: action.to_string(),
            target: target.map(str::to_string),
            prevent_default: *prevent_default,
        })
        .collect()
}

fn build_rules(archetype: Archetype, states: &[StateSpec]) -> Vec<InteractionRule> {
    let mut rules = Vec::new();

    match archetype {
        Archetype::Button | Archetype::IconButton => rules.push(InteractionRule {
            event: "click".into(),
            action: "activate".into(),
            target: None,
            condition: None,
        }),
        Archetype::Select | Archetype::Combobox | Archetype::Menu => {
            rules.push(InteractionRule {
                event: "focus".into(),
                action: "open".into(),
                target: None,
                condition: None,
            });
            rules.push(InteractionRule {
                event: "blur".into(),
                action: "close".into(),
                target: None,
                condition: Some("!hovering".into()),
            });
        }
        _ => {}
    }

    // One derived enter/leave pair per transient state.
    for spec in states {
        let (enter, leave) = match spec.state {
            SemanticState::Hover => ("mouseenter", "mouseleave"),
            SemanticState::Pressed => ("mousedown", "mouseup"),
            SemanticState::Focus => ("focus", "blur"),
            _ => continue,
        };
        rules.push(InteractionRule {
            event: enter.into(),
            action: "setState".into(),
            target: Some(spec.state.name().to_string()),
            condition: None,
        });
        rules.push(InteractionRule {
            event: leave.into(),
            action: "clearState".into(),
            target: Some(spec.state.name().to_string()),
            condition: None,
        });
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use weft_core::SourceNode;
    use weft_extract::extract;

    fn button_ir() -> StructuralIr {
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
        extract(&node, None, None)
    }

    #[test]
    fn test_button_states_include_default_and_hover() {
        let ir = button_ir();
        let intel = classify(&ir);
        assert_eq!(intel.archetype, Archetype::Button);
        assert_eq!(intel.confidence, 0.9);

        let iml = build_interaction(&ir, &intel);
        assert!(iml.has_state(SemanticState::Default));
        assert!(iml.has_state(SemanticState::Hover));
        assert_eq!(iml.state(SemanticState::Hover).unwrap().trigger, ":hover");
    }

    #[test]
    fn test_button_rules() {
        let ir = button_ir();
        let iml = build_interaction(&ir, &classify(&ir));

        assert!(iml.rules.iter().any(|r| r.event == "click" && r.action == "activate"));
        // Hover state derives an enter/leave pair.
        assert!(iml
            .rules
            .iter()
            .any(|r| r.event == "mouseenter" && r.target.as_deref() == Some("hover")));
        assert!(iml
            .rules
            .iter()
            .any(|r| r.event == "mouseleave" && r.target.as_deref() == Some("hover")));
    }

    #[test]
    fn test_default_state_synthesized() {
        let node = SourceNode {
            id: "2:1".into(),
            name: "Plain container".into(),
            node_type: "FRAME".into(),
            ..Default::default()
        };
        let ir = extract(&node, None, None);
        let iml = build_interaction(&ir, &classify(&ir));

        assert_eq!(iml.states.len(), 1);
        assert_eq!(iml.states[0].state, SemanticState::Default);
    }

    #[test]
    fn test_combobox_keyboard_and_rules() {
        let node = SourceNode {
            id: "3:1".into(),
            name: "Country combobox".into(),
            node_type: "FRAME".into(),
            ..Default::default()
        };
        let ir = extract(&node, None, None);
        let iml = build_interaction(&ir, &classify(&ir));

        assert_eq!(iml.archetype, Archetype::Combobox);
        assert!(iml.keyboard.iter().any(|k| k.key == "Escape" && k.action == "close"));
        assert!(iml.keyboard.iter().any(|k| k.key == "ArrowDown" && k.prevent_default));
        assert!(iml
            .rules
            .iter()
            .any(|r| r.event == "blur" && r.condition.as_deref() == Some("!hovering")));
        assert_eq!(iml.accessibility.expanded, Some(false));
    }

    #[test]
    fn test_accessibility_refined_by_slots() {
        let node: SourceNode = serde_json::from_str(
            r#"{
                "id": "4:1",
                "name": "Email input",
                "type": "FRAME",
                "children": [
                    { "id": "4:2", "name": "Label", "type": "TEXT" },
                    { "id": "4:3", "name": "Helper text", "type": "TEXT" }
                ]
            }"#,
        )
        .unwrap();
        let ir = extract(&node, None, None);
        let iml = build_interaction(&ir, &classify(&ir));

        assert_eq!(
            iml.accessibility.labelled_by.as_deref(),
            Some("email-input-label")
        );
        assert_eq!(
            iml.accessibility.described_by.as_deref(),
            Some("email-input-helper")
        );
        assert_eq!(iml.accessibility.role.as_deref(), Some("textbox"));
    }

    #[test]
    fn test_disabled_state_aria_delta() {
        let node: SourceNode = serde_json::from_str(
            r#"{
                "id": "5:1",
                "name": "Button",
                "type": "COMPONENT",
                "variantProperties": { "state": "disabled" }
            }"#,
        )
        .unwrap();
        let ir = extract(&node, None, None);
        let iml = build_interaction(&ir, &classify(&ir));

        let disabled = iml.state(SemanticState::Disabled).unwrap();
        assert_eq!(disabled.aria_deltas[0].attribute, "aria-disabled");
        assert_eq!(iml.accessibility.disabled, Some(false));
    }
}
