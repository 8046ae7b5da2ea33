//! Core types for the Weft design-to-component compiler.
//!
//! This crate provides the foundational types used across all other weft
//! crates:
//! - Value types (geometry, colors, paints, effects, typography)
//! - The read-only source model deserialized from a design-tool export
//!
//! No pipeline logic lives here; every stage crate consumes these types
//! and produces its own intermediate representation.

pub mod source;
pub mod types;

pub use source::*;
pub use types::*;
