//! Archetype classification.
//!
//! Two independent classifiers run over every extraction: ordered
//! name-substring rules (most specific first) and ordered structural
//! rules over the collected feature vector. A name verdict wins whenever
//! it is not `Unknown`, at confidence 0.9 against 0.7 for a structural
//! match; the detection source is recorded either way.

use weft_extract::StructuralIr;

use crate::archetype::{Archetype, ComponentIntelligence, DetectionSource};
use crate::features::{self, StructuralFeatures};

/// Name rules in priority order. Every listed substring must appear in
/// the lowercased component name for the rule to fire.
const NAME_RULES: &[(&[&str], Archetype)] = &[
    (&["icon", "button"], Archetype::IconButton),
    (&["icon", "btn"], Archetype::IconButton),
    (&["button"], Archetype::Button),
    (&["btn"], Archetype::Button),
    (&["textarea"], Archetype::Textarea),
    (&["text", "area"], Archetype::Textarea),
    (&["checkbox"], Archetype::Checkbox),
    (&["radio"], Archetype::Radio),
    (&["switch"], Archetype::Switch),
    (&["toggle"], Archetype::Switch),
    (&["slider"], Archetype::Slider),
    (&["combobox"], Archetype::Combobox),
    (&["combo", "box"], Archetype::Combobox),
    (&["autocomplete"], Archetype::Combobox),
    (&["dropdown", "menu"], Archetype::Menu),
    (&["menu"], Archetype::Menu),
    (&["select"], Archetype::Select),
    (&["dropdown"], Archetype::Select),
    (&["dialog"], Archetype::Dialog),
    (&["modal"], Archetype::Dialog),
    (&["tooltip"], Archetype::Tooltip),
    (&["popover"], Archetype::Popover),
    (&["tabs"], Archetype::Tabs),
    (&["tab", "bar"], Archetype::Tabs),
    (&["accordion"], Archetype::Accordion),
    (&["breadcrumb"], Archetype::Breadcrumb),
    (&["pagination"], Archetype::Pagination),
    (&["progress"], Archetype::Progress),
    (&["spinner"], Archetype::Progress),
    (&["badge"], Archetype::Badge),
    (&["chip"], Archetype::Badge),
    (&["tag"], Archetype::Badge),
    (&["avatar"], Archetype::Avatar),
    (&["alert"], Archetype::Alert),
    (&["toast"], Archetype::Alert),
    (&["banner"], Archetype::Alert),
    (&["card"], Archetype::Card),
    (&["tile"], Archetype::Card),
    (&["input"], Archetype::Input),
    (&["field"], Archetype::Input),
    (&["search"], Archetype::Input),
];

/// Classify one component from its structural IR.
pub fn classify(ir: &StructuralIr) -> ComponentIntelligence {
    let (archetype, confidence, source) = match classify_by_name(&ir.meta.name) {
        Some(archetype) => (archetype, 0.9, DetectionSource::Name),
        None => match classify_by_structure(&features::collect(ir)) {
            Some(archetype) => (archetype, 0.7, DetectionSource::Structure),
            None => (Archetype::Unknown, 0.0, DetectionSource::Structure),
        },
    };

    tracing::debug!(
        archetype = archetype.as_str(),
        confidence,
        ?source,
        "component classified"
    );

    ComponentIntelligence {
        archetype,
        confidence,
        source,
        required_primitives: archetype
            .required_primitives()
            .iter()
            .map(|p| p.to_string())
            .collect(),
        suggested_role: archetype.suggested_role().map(str::to_string),
        slot_patterns: ir.slots.iter().map(|s| s.name.clone()).collect(),
    }
}

fn classify_by_name(name: &str) -> Option<Archetype> {
    let name = name.to_lowercase();
    NAME_RULES
        .iter()
        .find(|(parts, _)| parts.iter().all(|part| name.contains(part)))
        .map(|(_, archetype)| *archetype)
}

/// Structural rules in priority order, most specific first.
fn classify_by_structure(f: &StructuralFeatures) -> Option<Archetype> {
    if f.has_checkbox {
        return Some(Archetype::Checkbox);
    }
    if f.has_radio {
        return Some(Archetype::Radio);
    }
    if f.has_slider {
        return Some(Archetype::Slider);
    }
    if f.has_overlay && f.has_input {
        return Some(Archetype::Combobox);
    }
    if f.has_overlay && f.has_list {
        return Some(Archetype::Select);
    }
    if f.has_overlay {
        return Some(Archetype::Dialog);
    }
    if f.has_input && f.has_list {
        return Some(Archetype::Combobox);
    }
    if f.has_input {
        return Some(Archetype::Input);
    }
    if f.interaction_count >= 3 {
        return Some(Archetype::Card);
    }
    if f.has_icon && !f.has_text && f.max_depth <= 2 {
        return Some(Archetype::IconButton);
    }
    if f.has_text && f.has_icon && f.max_depth <= 3 {
        return Some(Archetype::Button);
    }
    if f.has_list {
        return Some(Archetype::Menu);
    }
    if f.has_text && f.max_depth <= 2 {
        return Some(Archetype::Button);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::SourceNode;
    use weft_extract::extract;

    fn ir_named(name: &str) -> StructuralIr {
        let node = SourceNode {
            id: "1:1".into(),
            name: name.into(),
            node_type: "FRAME".into(),
            ..Default::default()
        };
        extract(&node, None, None)
    }

    #[test]
    fn test_icon_button_beats_button() {
        // The archetype-priority contract: a more specific rule fires
        // even when a broader one would also match.
        let intel = classify(&ir_named("Icon Button"));
        assert_eq!(intel.archetype, Archetype::IconButton);
        assert_eq!(intel.confidence, 0.9);
        assert_eq!(intel.source, DetectionSource::Name);
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(classify_by_name("Button/Primary"), Some(Archetype::Button));
        assert_eq!(classify_by_name("Search field"), Some(Archetype::Input));
        assert_eq!(classify_by_name("Confirm modal"), Some(Archetype::Dialog));
        assert_eq!(classify_by_name("Dropdown menu"), Some(Archetype::Menu));
        assert_eq!(classify_by_name("Country select"), Some(Archetype::Select));
        assert_eq!(classify_by_name("Status chip"), Some(Archetype::Badge));
        assert_eq!(classify_by_name("Plain container"), None);
    }

    #[test]
    fn test_structure_fallback() {
        let node: SourceNode = serde_json::from_str(
            r#"{
                "id": "1:1", "name": "Row", "type": "FRAME",
                "children": [
                    { "id": "1:2", "name": "Value text", "type": "TEXT" }
                ]
            }"#,
        )
        .unwrap();
        let intel = classify(&extract(&node, None, None));
        assert_eq!(intel.archetype, Archetype::Button);
        assert_eq!(intel.confidence, 0.7);
        assert_eq!(intel.source, DetectionSource::Structure);
    }

    #[test]
    fn test_unknown_fallback() {
        let intel = classify(&ir_named("Plain container"));
        assert_eq!(intel.archetype, Archetype::Unknown);
        assert_eq!(intel.confidence, 0.0);
        assert!(intel.required_primitives.is_empty());
    }

    #[test]
    fn test_overlay_structure_rules() {
        let node: SourceNode = serde_json::from_str(
            r#"{
                "id": "1:1", "name": "Picker", "type": "FRAME",
                "children": [
                    { "id": "1:2", "name": "Query field", "type": "FRAME" },
                    { "id": "1:3", "name": "Results overlay", "type": "FRAME" }
                ]
            }"#,
        )
        .unwrap();
        let intel = classify(&extract(&node, None, None));
        assert_eq!(intel.archetype, Archetype::Combobox);
        assert_eq!(intel.source, DetectionSource::Structure);
    }

    #[test]
    fn test_slot_patterns_recorded() {
        let node: SourceNode = serde_json::from_str(
            r#"{
                "id": "1:1", "name": "Plain container", "type": "FRAME",
                "children": [
                    { "id": "1:2", "name": "Icon", "type": "VECTOR" }
                ]
            }"#,
        )
        .unwrap();
        let intel = classify(&extract(&node, None, None));
        assert_eq!(intel.slot_patterns, vec!["icon"]);
    }
}
