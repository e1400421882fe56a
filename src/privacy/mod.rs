//! Synthetic value generation for anonymization
//!
//! This module contains the pieces that decide what a PII column is replaced
//! with: the seeded value synthesizer, the uniqueness guard around it, and the
//! per-field overwrite policy.

pub mod corpus;
pub mod policy;
pub mod synthesizer;
pub mod unique;

// Re-export commonly used items for convenience
pub use policy::{FieldChange, Overwrite, PolicyTable};
pub use synthesizer::{Category, PersonName, PostalAddress, Synthesize, ValueSynthesizer};
pub use unique::{History, UniqueAssigner};
