//! Error types for artifact generation.

use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that can surface from the generator.
///
/// Schema violations are the only failures produced by the pipeline's own
/// data; the template variants cover programming errors in the registered
/// shells and should not occur at runtime.
#[derive(Error, Debug)]
pub enum GenError {
    /// An IR failed its structural contract before generation.
    #[error("schema validation failed at {path}: {message}")]
    Schema { path: String, message: String },

    /// A registered template shell failed to parse.
    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// A template shell failed to render.
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl GenError {
    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}
