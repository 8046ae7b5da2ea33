//! Token IR data model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use weft_core::{format_scalar, Color};

/// Semantic category of a design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Color,
    Spacing,
    Typography,
    Sizing,
    Radius,
    Shadow,
    Opacity,
    Other,
}

/// A resolved per-mode token value.
///
/// `Unresolved` is the recovery marker for alias cycles, depth-bound
/// overruns, and dangling references; it is data, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenValue {
    Color(Color),
    Number(f64),
    Text(String),
    Flag(bool),
    Unresolved { alias_id: String },
}

impl TokenValue {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved { .. })
    }

    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// CSS-literal form for styling annotations.
    pub fn to_css(&self) -> String {
        match self {
            Self::Color(c) => c.to_css(),
            Self::Number(n) => format!("{}px", format_scalar(*n)),
            Self::Text(s) => s.clone(),
            Self::Flag(b) => b.to_string(),
            Self::Unresolved { alias_id } => format!("unresolved({})", alias_id),
        }
    }
}

/// One resolved design token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticToken {
    /// Canonical name, as exported by the design tool.
    pub name: String,
    pub default_value: TokenValue,
    /// Mode id -> resolved value.
    pub modes: IndexMap<String, TokenValue>,
    pub kind: TokenKind,
    /// Direct alias target in the default mode, when the variable is one.
    pub alias_of: Option<String>,
    /// Identity of the source variable.
    pub source_id: String,
}

/// Relationship carried by a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRelation {
    Alias,
    Reference,
    Derived,
}

/// A directed edge of the token dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub relation: EdgeRelation,
}

/// Dependency graph across tokens and the nodes referencing them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub(crate) fn add_node(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.nodes.contains(&id) {
            self.nodes.push(id);
        }
    }

    pub(crate) fn add_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        relation: EdgeRelation,
    ) {
        self.edges.push(DependencyEdge {
            from: from.into(),
            to: to.into(),
            relation,
        });
    }
}

/// The token intermediate representation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenIr {
    /// Canonical name -> token, in variable-table order.
    pub tokens: IndexMap<String, SemanticToken>,
    pub graph: DependencyGraph,
    /// Token name -> ids of nodes referencing it.
    pub usage: IndexMap<String, Vec<String>>,
}

impl TokenIr {
    pub fn get(&self, name: &str) -> Option<&SemanticToken> {
        self.tokens.get(name)
    }

    /// Tokens that kept an unresolved marker in any mode.
    pub fn unresolved(&self) -> Vec<&SemanticToken> {
        self.tokens
            .values()
            .filter(|t| {
                t.default_value.is_unresolved() || t.modes.values().any(|v| v.is_unresolved())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_value_css() {
        assert_eq!(TokenValue::Number(16.0).to_css(), "16px");
        assert_eq!(
            TokenValue::Color(Color::rgb(1.0, 0.0, 0.0)).to_css(),
            "#ff0000"
        );
        assert!(TokenValue::Unresolved { alias_id: "V:9".into() }.is_unresolved());
    }

    #[test]
    fn test_graph_dedupes_nodes() {
        let mut graph = DependencyGraph::default();
        graph.add_node("a");
        graph.add_node("a");
        graph.add_node("b");
        assert_eq!(graph.nodes, vec!["a", "b"]);
    }
}
