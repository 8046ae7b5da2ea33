//! Token IR extraction and matching.
//!
//! Two independent services over the design-variable table:
//!
//! - [`build`] resolves raw variables (including alias chains) into the
//!   token intermediate representation with a dependency graph and a
//!   node-usage index.
//! - [`matcher::match_tokens`] reconciles externally supplied variables
//!   with a project's own token catalog for styling annotations.
//!
//! Neither service fails: unresolved aliases keep a marker and log a
//! warning, and an unmatched variable yields a null match.

pub mod matcher;
pub mod model;
mod resolve;

pub use matcher::{match_tokens, ExternalVariable, MatchedToken, ProjectToken, TokenMatch};
pub use model::{
    DependencyEdge, DependencyGraph, EdgeRelation, SemanticToken, TokenIr, TokenKind, TokenValue,
};
pub use resolve::{build, MAX_ALIAS_DEPTH};
