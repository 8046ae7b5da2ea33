//! Deterministic artifact generation from the Weft IRs.
//!
//! [`generate`] consumes the structural, token, and interaction IRs and
//! emits the four component artifacts: component source, a type
//! declaration block, a stylesheet, and a story scaffold. Identical
//! inputs produce byte-identical strings; the only hard failure is a
//! schema violation in the inputs, reported with the offending field
//! path.

mod component;
pub mod error;
mod markup;
mod naming;
mod props;
mod story;
mod styles;
mod templates;
mod validate;
mod vector;

pub use error::{GenError, Result};
pub use naming::{component_ident, css_ident};
pub use templates::TemplateEngine;
pub use validate::validate;

use indexmap::IndexMap;

use weft_analyze::InteractionModel;
use weft_extract::StructuralIr;
use weft_tokens::{TokenIr, TokenMatch};

/// The four generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedComponent {
    pub component: String,
    pub types: String,
    pub styles: String,
    pub story: String,
}

/// Lookup from a CSS literal to the project's style-variable name.
///
/// Built from token-matcher output; when a literal is known, generated
/// styling references the variable with the literal as fallback.
#[derive(Debug, Clone, Default)]
pub struct StyleTokenLookup {
    entries: IndexMap<String, String>,
}

impl StyleTokenLookup {
    pub fn insert(&mut self, literal: impl Into<String>, variable: impl Into<String>) {
        self.entries.insert(literal.into(), variable.into());
    }

    pub fn resolve(&self, literal: &str) -> Option<&str> {
        self.entries.get(literal).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a lookup from matcher results, keeping only matches whose
    /// project token publishes a style variable.
    pub fn from_matches(matches: &[TokenMatch]) -> Self {
        let mut lookup = Self::default();
        for result in matches {
            let Some(matched) = &result.matched else { continue };
            let Some(variable) = &matched.style_variable_name else { continue };
            lookup.insert(matched.value.to_lowercase(), variable.clone());
        }
        lookup
    }
}

/// Options for one generation call.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Optional style-token lookup for annotating generated styling.
    pub style_tokens: StyleTokenLookup,
}

/// Generate the four artifacts for one component.
///
/// Pure and deterministic: no I/O, no clock, no randomness. Missing
/// optional IR fields degrade to placeholders or omitted attributes;
/// generation is meaningfully empty (a wrapper around the children
/// placeholder) when the tree has no children and no slots.
pub fn generate(
    name: &str,
    irs: &StructuralIr,
    irt: &TokenIr,
    iml: &InteractionModel,
    options: &GenerateOptions,
) -> Result<GeneratedComponent> {
    validate::validate(irs, irt, iml)?;

    let ident = naming::component_ident(name);
    let class = naming::css_ident(name);
    let engine = TemplateEngine::new()?;
    let prop_set = props::prop_set(irs, iml);

    let generated = GeneratedComponent {
        component: component::render_component(
            &ident,
            &class,
            irs,
            iml,
            &options.style_tokens,
            &engine,
        )?,
        types: props::render_types(&ident, &prop_set),
        styles: styles::render_styles(&class, irs, irt, iml, &options.style_tokens),
        story: story::render_story(&ident, irs, iml, &engine)?,
    };

    tracing::debug!(
        component = %ident,
        archetype = iml.archetype.as_str(),
        component_bytes = generated.component.len(),
        styles_bytes = generated.styles.len(),
        "artifact generation complete"
    );

    Ok(generated)
}
