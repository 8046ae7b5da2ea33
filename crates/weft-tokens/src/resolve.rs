//! Variable table resolution into the token IR.
//!
//! Alias chains resolve through the aliased variable's own mode table
//! with a visited set and a hard depth bound, so adversarial cyclic
//! input terminates. A cycle, an over-deep chain, or a dangling id keeps
//! the `Unresolved` marker and logs a warning; resolution itself never
//! fails.

use std::collections::HashSet;

use indexmap::IndexMap;

use weft_core::{SourceNode, SourceVariable, SourceVariableValue, VariableCollection};

use crate::model::{
    DependencyGraph, EdgeRelation, SemanticToken, TokenIr, TokenKind, TokenValue,
};

/// Maximum alias-chain length followed before giving up.
pub const MAX_ALIAS_DEPTH: usize = 10;

/// Build the token IR from a variable table, collection metadata, and the
/// node subtrees to scan for variable usage.
pub fn build(
    variables: &IndexMap<String, SourceVariable>,
    collections: &[VariableCollection],
    scan_roots: &[&SourceNode],
) -> TokenIr {
    let mut graph = DependencyGraph::default();
    let mut tokens: IndexMap<String, SemanticToken> = IndexMap::new();

    for variable in variables.values() {
        graph.add_node(variable.name.clone());
    }

    for variable in variables.values() {
        let default_mode = default_mode_id(variable, collections);

        let mut modes: IndexMap<String, TokenValue> = IndexMap::new();
        for (mode_id, raw) in &variable.values_by_mode {
            let mut visited = HashSet::new();
            visited.insert(variable.id.clone());
            let (value, hops) = resolve_value(variables, raw, mode_id, &mut visited, 0);
            record_alias_edges(&mut graph, variables, variable, raw, hops);
            modes.insert(mode_id.clone(), value);
        }

        let default_value = default_mode
            .as_deref()
            .and_then(|m| modes.get(m))
            .or_else(|| modes.values().next())
            .cloned()
            .unwrap_or(TokenValue::Unresolved {
                alias_id: variable.id.clone(),
            });

        let alias_of = default_mode
            .as_deref()
            .and_then(|m| variable.values_by_mode.get(m))
            .or_else(|| variable.values_by_mode.values().next())
            .and_then(|raw| match raw {
                SourceVariableValue::Alias(alias) => variables
                    .get(&alias.id)
                    .map(|target| target.name.clone()),
                _ => None,
            });

        let kind = infer_kind(variable, &default_value);

        tokens.insert(
            variable.name.clone(),
            SemanticToken {
                name: variable.name.clone(),
                default_value,
                modes,
                kind,
                alias_of,
                source_id: variable.id.clone(),
            },
        );
    }

    let usage = scan_usage(variables, scan_roots, &mut graph);

    TokenIr { tokens, graph, usage }
}

fn default_mode_id(
    variable: &SourceVariable,
    collections: &[VariableCollection],
) -> Option<String> {
    let collection_id = variable.variable_collection_id.as_deref()?;
    collections
        .iter()
        .find(|c| c.id == collection_id)
        .and_then(|c| c.default_mode_id.clone())
}

/// Resolve one raw per-mode value, following alias links.
///
/// Returns the resolved value and the number of alias hops taken.
fn resolve_value(
    variables: &IndexMap<String, SourceVariable>,
    raw: &SourceVariableValue,
    mode_id: &str,
    visited: &mut HashSet<String>,
    depth: usize,
) -> (TokenValue, usize) {
    match raw {
        SourceVariableValue::Alias(alias) => {
            if depth >= MAX_ALIAS_DEPTH {
                tracing::warn!(
                    alias = %alias.id,
                    depth,
                    "alias chain exceeds depth bound; keeping unresolved marker"
                );
                return (TokenValue::Unresolved { alias_id: alias.id.clone() }, depth);
            }
            if !visited.insert(alias.id.clone()) {
                tracing::warn!(
                    alias = %alias.id,
                    "alias cycle detected; keeping unresolved marker"
                );
                return (TokenValue::Unresolved { alias_id: alias.id.clone() }, depth);
            }
            let Some(target) = variables.get(&alias.id) else {
                tracing::warn!(
                    alias = %alias.id,
                    "alias target missing from variable table"
                );
                return (TokenValue::Unresolved { alias_id: alias.id.clone() }, depth);
            };

            // Prefer the same mode on the target; fall back to its first.
            let next = target
                .values_by_mode
                .get(mode_id)
                .or_else(|| target.values_by_mode.values().next());
            match next {
                Some(next) => resolve_value(variables, next, mode_id, visited, depth + 1),
                None => {
                    tracing::warn!(
                        alias = %alias.id,
                        "alias target has no mode values"
                    );
                    (TokenValue::Unresolved { alias_id: alias.id.clone() }, depth)
                }
            }
        }
        SourceVariableValue::Color(c) => (TokenValue::Color(*c), depth),
        SourceVariableValue::Number(n) => (TokenValue::Number(*n), depth),
        SourceVariableValue::Text(s) => (TokenValue::Text(s.clone()), depth),
        SourceVariableValue::Flag(b) => (TokenValue::Flag(*b), depth),
    }
}

/// Record alias and derived edges for one raw mode value.
fn record_alias_edges(
    graph: &mut DependencyGraph,
    variables: &IndexMap<String, SourceVariable>,
    variable: &SourceVariable,
    raw: &SourceVariableValue,
    hops: usize,
) {
    let SourceVariableValue::Alias(alias) = raw else { return };
    let Some(target) = variables.get(&alias.id) else { return };

    let relation = if hops > 1 {
        EdgeRelation::Derived
    } else {
        EdgeRelation::Alias
    };
    let exists = graph.edges.iter().any(|e| {
        e.from == variable.name && e.to == target.name && e.relation == relation
    });
    if !exists {
        graph.add_edge(variable.name.clone(), target.name.clone(), relation);
    }
}

/// Decide the token kind: scope hints first, then name substrings, then
/// value shape.
fn infer_kind(variable: &SourceVariable, value: &TokenValue) -> TokenKind {
    for scope in &variable.scopes {
        match scope.to_ascii_uppercase().as_str() {
            "ALL_FILLS" | "FILL_COLOR" | "STROKE_COLOR" | "TEXT_FILL" | "EFFECT_COLOR" => {
                return TokenKind::Color
            }
            "GAP" | "PADDING" => return TokenKind::Spacing,
            "WIDTH_HEIGHT" => return TokenKind::Sizing,
            "CORNER_RADIUS" => return TokenKind::Radius,
            "OPACITY" => return TokenKind::Opacity,
            "FONT_SIZE" | "FONT_FAMILY" | "FONT_WEIGHT" | "LINE_HEIGHT" | "LETTER_SPACING" => {
                return TokenKind::Typography
            }
            _ => {}
        }
    }

    let name = variable.name.to_lowercase();
    if name.contains("color") || name.contains("colour") || name.contains("palette") {
        return TokenKind::Color;
    }
    if name.contains("spacing") || name.contains("space") || name.contains("gap")
        || name.contains("padding") || name.contains("margin")
    {
        return TokenKind::Spacing;
    }
    if name.contains("radius") || name.contains("corner") || name.contains("rounded") {
        return TokenKind::Radius;
    }
    if name.contains("shadow") || name.contains("elevation") {
        return TokenKind::Shadow;
    }
    if name.contains("opacity") || name.contains("alpha") {
        return TokenKind::Opacity;
    }
    if name.contains("font") || name.contains("type") || name.contains("letter")
        || name.contains("line-height")
    {
        return TokenKind::Typography;
    }
    if name.contains("size") || name.contains("width") || name.contains("height") {
        return TokenKind::Sizing;
    }

    match value {
        TokenValue::Color(_) => TokenKind::Color,
        TokenValue::Text(s) if looks_like_color(s) => TokenKind::Color,
        TokenValue::Number(_) => TokenKind::Spacing,
        _ => TokenKind::Other,
    }
}

fn looks_like_color(text: &str) -> bool {
    let t = text.trim();
    (t.starts_with('#') && weft_core::Color::from_hex(t).is_some())
        || t.starts_with("rgb(")
        || t.starts_with("rgba(")
}

/// Walk the node subtrees and index which tokens which nodes reference.
fn scan_usage(
    variables: &IndexMap<String, SourceVariable>,
    scan_roots: &[&SourceNode],
    graph: &mut DependencyGraph,
) -> IndexMap<String, Vec<String>> {
    let mut usage: IndexMap<String, Vec<String>> = IndexMap::new();
    for root in scan_roots {
        scan_node(variables, root, graph, &mut usage);
    }
    usage
}

fn scan_node(
    variables: &IndexMap<String, SourceVariable>,
    node: &SourceNode,
    graph: &mut DependencyGraph,
    usage: &mut IndexMap<String, Vec<String>>,
) {
    for binding in node.bound_variables.values() {
        let Some(variable) = variables.get(&binding.id) else { continue };
        let entry = usage.entry(variable.name.clone()).or_default();
        if !entry.contains(&node.id) {
            entry.push(node.id.clone());
            graph.add_node(node.id.clone());
            graph.add_edge(node.id.clone(), variable.name.clone(), EdgeRelation::Reference);
        }
    }
    for child in &node.children {
        scan_node(variables, child, graph, usage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{Color, SourceAlias};

    fn color_value(r: f64, g: f64, b: f64) -> SourceVariableValue {
        SourceVariableValue::Color(Color::rgb(r, g, b))
    }

    fn alias_value(id: &str) -> SourceVariableValue {
        SourceVariableValue::Alias(SourceAlias {
            marker: "VARIABLE_ALIAS".into(),
            id: id.into(),
        })
    }

    fn variable(id: &str, name: &str, values: Vec<(&str, SourceVariableValue)>) -> SourceVariable {
        SourceVariable {
            id: id.into(),
            name: name.into(),
            resolved_type: "COLOR".into(),
            values_by_mode: values
                .into_iter()
                .map(|(mode, value)| (mode.to_string(), value))
                .collect(),
            ..Default::default()
        }
    }

    fn table(vars: Vec<SourceVariable>) -> IndexMap<String, SourceVariable> {
        vars.into_iter().map(|v| (v.id.clone(), v)).collect()
    }

    #[test]
    fn test_literal_resolution() {
        let vars = table(vec![variable(
            "V:1",
            "color/primary/500",
            vec![("m1", color_value(0.2, 0.4, 1.0))],
        )]);

        let ir = build(&vars, &[], &[]);
        let token = ir.get("color/primary/500").unwrap();
        assert_eq!(token.kind, TokenKind::Color);
        assert!(token.default_value.as_color().is_some());
        assert!(token.alias_of.is_none());
    }

    #[test]
    fn test_alias_resolution_through_target_modes() {
        let vars = table(vec![
            variable("V:1", "semantic/bg", vec![("m1", alias_value("V:2"))]),
            variable("V:2", "base/blue", vec![("m1", color_value(0.0, 0.0, 1.0))]),
        ]);

        let ir = build(&vars, &[], &[]);
        let token = ir.get("semantic/bg").unwrap();
        assert_eq!(token.alias_of.as_deref(), Some("base/blue"));
        assert_eq!(
            token.modes["m1"],
            TokenValue::Color(Color::rgb(0.0, 0.0, 1.0))
        );
        assert!(ir
            .graph
            .edges
            .iter()
            .any(|e| e.from == "semantic/bg"
                && e.to == "base/blue"
                && e.relation == EdgeRelation::Alias));
    }

    #[test]
    fn test_cyclic_alias_terminates_with_marker() {
        let vars = table(vec![
            variable("V:1", "a", vec![("m1", alias_value("V:2"))]),
            variable("V:2", "b", vec![("m1", alias_value("V:1"))]),
        ]);

        let ir = build(&vars, &[], &[]);
        assert!(ir.get("a").unwrap().modes["m1"].is_unresolved());
        assert!(ir.get("b").unwrap().modes["m1"].is_unresolved());
        assert_eq!(ir.unresolved().len(), 2);
    }

    #[test]
    fn test_deep_chain_hits_depth_bound() {
        // V:0 -> V:1 -> ... -> V:12 -> literal; the bound cuts it off.
        let mut vars = Vec::new();
        for i in 0..12 {
            vars.push(variable(
                &format!("V:{}", i),
                &format!("chain/{}", i),
                vec![("m1", alias_value(&format!("V:{}", i + 1)))],
            ));
        }
        vars.push(variable("V:12", "chain/12", vec![("m1", color_value(1.0, 1.0, 1.0))]));

        let ir = build(&table(vars), &[], &[]);
        assert!(ir.get("chain/0").unwrap().modes["m1"].is_unresolved());
        // A chain inside the bound still resolves.
        assert!(!ir.get("chain/5").unwrap().modes["m1"].is_unresolved());
    }

    #[test]
    fn test_dangling_alias_keeps_marker() {
        let vars = table(vec![variable("V:1", "a", vec![("m1", alias_value("V:404"))])]);
        let ir = build(&vars, &[], &[]);
        assert_eq!(
            ir.get("a").unwrap().modes["m1"],
            TokenValue::Unresolved { alias_id: "V:404".into() }
        );
    }

    #[test]
    fn test_kind_inference_priority() {
        // Scope hint beats the name.
        let mut scoped = variable("V:1", "color/oddly-named", vec![("m1", SourceVariableValue::Number(4.0))]);
        scoped.scopes = vec!["CORNER_RADIUS".into()];
        assert_eq!(infer_kind(&scoped, &TokenValue::Number(4.0)), TokenKind::Radius);

        // Name beats value shape.
        let named = variable("V:2", "spacing/md", vec![("m1", SourceVariableValue::Number(16.0))]);
        assert_eq!(infer_kind(&named, &TokenValue::Number(16.0)), TokenKind::Spacing);

        // Value shape is the fallback.
        let bare = variable("V:3", "md", vec![("m1", SourceVariableValue::Number(16.0))]);
        assert_eq!(infer_kind(&bare, &TokenValue::Number(16.0)), TokenKind::Spacing);
        let hexish = variable("V:4", "mystery", vec![("m1", SourceVariableValue::Text("#ff0000".into()))]);
        assert_eq!(
            infer_kind(&hexish, &TokenValue::Text("#ff0000".into())),
            TokenKind::Color
        );
    }

    #[test]
    fn test_usage_index() {
        let vars = table(vec![variable(
            "V:1",
            "color/primary/500",
            vec![("m1", color_value(0.2, 0.4, 1.0))],
        )]);

        let node: SourceNode = serde_json::from_str(
            r#"{
                "id": "1:1",
                "name": "Button",
                "type": "FRAME",
                "boundVariables": { "fills": { "id": "V:1" } },
                "children": [
                    {
                        "id": "1:2",
                        "name": "Label",
                        "type": "TEXT",
                        "boundVariables": { "fills": { "id": "V:1" } }
                    }
                ]
            }"#,
        )
        .unwrap();

        let ir = build(&vars, &[], &[&node]);
        assert_eq!(ir.usage["color/primary/500"], vec!["1:1", "1:2"]);
        assert!(ir
            .graph
            .edges
            .iter()
            .any(|e| e.relation == EdgeRelation::Reference && e.from == "1:1"));
    }
}
