//! Core data types for symptom matching.
//!
//! - [`ConditionRecord`]: A reference condition with symptom keywords, specialist and precautions
//! - [`ConditionId`]: Slug identifier derived from a condition name
//! - [`Confidence`]: Display classification of a similarity score
//!
//! Records are created once when the catalog is loaded and never mutated afterwards.
//!
//! [`ConditionRecord`]: condition::ConditionRecord
//! [`ConditionId`]: types::ConditionId
//! [`Confidence`]: types::Confidence

pub mod condition;
pub mod types;
