//! Identifier sanitization and casing for generated artifacts.
//!
//! Every name that reaches an artifact goes through one of these helpers
//! so casing and character rules live in exactly one place.

use convert_case::{Case, Casing};

/// PascalCase component identifier, guaranteed to be a valid TS name.
pub fn component_ident(name: &str) -> String {
    let ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_case(Case::Pascal);

    if ident.is_empty() {
        "Component".to_string()
    } else if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("Component{}", ident)
    } else {
        ident
    }
}

/// camelCase property identifier.
pub fn prop_ident(name: &str) -> String {
    let ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_case(Case::Camel);

    if ident.is_empty() {
        "prop".to_string()
    } else if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("prop{}", ident.to_case(Case::Pascal))
    } else {
        ident
    }
}

/// kebab-case CSS class or custom-property stem.
pub fn css_ident(name: &str) -> String {
    let ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_case(Case::Kebab);

    if ident.is_empty() {
        "component".to_string()
    } else {
        ident
    }
}

/// BEM-style modifier class for a variant.
pub fn modifier_class(base: &str, variant: &str) -> String {
    format!("{}--{}", base, css_ident(variant))
}

/// Escape text for a single-quoted TS string literal.
pub fn escape_ts_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

/// Escape text placed directly into JSX content.
pub fn escape_jsx_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}
