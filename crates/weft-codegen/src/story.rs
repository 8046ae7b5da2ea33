//! Story/catalog scaffold rendering.
//!
//! One example per variant entry (bounded to ten), one accessibility
//! example when the component carries a label mapping, and one example
//! per non-default interaction state.

use std::collections::HashSet;

use serde_json::json;

use weft_analyze::InteractionModel;
use weft_extract::{SemanticState, StructuralIr};

use crate::error::Result;
use crate::naming::{component_ident, escape_ts_string, prop_ident};
use crate::templates::TemplateEngine;

/// Most variant examples emitted into one story file.
const MAX_VARIANT_STORIES: usize = 10;

/// Render the story artifact.
pub(crate) fn render_story(
    ident: &str,
    irs: &StructuralIr,
    iml: &InteractionModel,
    engine: &TemplateEngine,
) -> Result<String> {
    let mut out = engine.render("story_shell", &json!({ "component": ident }))?;

    let mut used_names: HashSet<String> = HashSet::new();
    let mut blocks = Vec::new();

    blocks.push(story_block(
        &unique_name("Default", &mut used_names),
        &[],
        None,
    ));

    for entry in irs.variants.entries.iter().take(MAX_VARIANT_STORIES) {
        let name = unique_name(&component_ident(&entry.name), &mut used_names);
        let args: Vec<(String, String)> = entry
            .properties
            .iter()
            .map(|(key, value)| {
                (
                    prop_ident(key),
                    format!("'{}'", escape_ts_string(value)),
                )
            })
            .collect();
        blocks.push(story_block(&name, &args, None));
    }

    if iml.accessibility.label.is_some() || iml.accessibility.labelled_by.is_some() {
        let label = iml
            .accessibility
            .label
            .clone()
            .unwrap_or_else(|| irs.meta.name.clone());
        let name = unique_name("WithAccessibleLabel", &mut used_names);
        blocks.push(story_block(
            &name,
            &[(
                "'aria-label'".to_string(),
                format!("'{}'", escape_ts_string(&label)),
            )],
            None,
        ));
    }

    for spec in &iml.states {
        if spec.state == SemanticState::Default {
            continue;
        }
        let name = unique_name(
            &format!("{}State", component_ident(spec.state.name())),
            &mut used_names,
        );
        blocks.push(story_block(&name, &[], Some(spec.state)));
    }

    out.push('\n');
    out.push_str(&blocks.join("\n\n"));
    out.push('\n');
    Ok(out)
}

fn story_block(name: &str, args: &[(String, String)], state: Option<SemanticState>) -> String {
    let mut lines = vec![format!("export const {}: Story = {{", name)];

    if args.is_empty() {
        lines.push("  args: {},".to_string());
    } else {
        lines.push("  args: {".to_string());
        for (key, value) in args {
            lines.push(format!("    {}: {},", key, value));
        }
        lines.push("  },".to_string());
    }

    if let Some(state) = state {
        match state.css_trigger() {
            "" => {}
            trigger => {
                lines.push("  parameters: {".to_string());
                lines.push(format!(
                    "    pseudo: {{ {}: true }},",
                    trigger.trim_start_matches(':').replace("-visible", "")
                ));
                lines.push("  },".to_string());
            }
        }
    }

    lines.push("};".to_string());
    lines.join("\n")
}

fn unique_name(base: &str, used: &mut HashSet<String>) -> String {
    if used.insert(base.to_string()) {
        return base.to_string();
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{}{}", base, counter);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}
