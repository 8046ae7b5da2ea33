//! Component classification and interaction-model derivation.
//!
//! Two pure functions over the structural IR:
//!
//! - [`classify`] infers the component archetype from ordered name rules
//!   and a structural feature vector, with the name verdict winning
//!   whenever it is conclusive.
//! - [`build_interaction`] derives the interaction model: semantic
//!   states with CSS triggers, a slot-refined accessibility mapping,
//!   archetype keyboard tables, and interaction rules.

pub mod archetype;
mod classify;
pub mod features;
mod interaction;

pub use archetype::{Archetype, ComponentIntelligence, DetectionSource};
pub use classify::classify;
pub use features::StructuralFeatures;
pub use interaction::{
    build_interaction, AccessibilityMap, AriaDelta, InteractionModel, InteractionRule,
    KeyBinding, StateSpec,
};
