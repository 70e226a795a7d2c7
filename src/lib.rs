//! # symptom-matcher
//!
//! A small library for ranking plausible conditions from free-text symptoms.
//!
//! The user's text is compared against a static reference table of conditions
//! (symptom keywords, the specialist to visit, precautions) using TF-IDF
//! weighting and cosine similarity. It is an educational demo and not a
//! medical system.
//!
//! ## Features
//!
//! - **Deterministic model**: IDF weights are learned once from the table and
//!   rebuilding from the same table yields bit-identical vectors
//! - **Stable ranking**: equal scores keep reference table order
//! - **Blank input is a no-op**: an empty query returns no results, not an error
//! - **External catalog**: the table is JSON, TSV or CSV data, embedded by default
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_matcher::{ConditionCatalog, SymptomMatcher};
//!
//! let catalog = ConditionCatalog::load_embedded().unwrap();
//! let matcher = SymptomMatcher::from_catalog(&catalog).unwrap();
//!
//! for (i, m) in matcher.rank("fever cough chest pain", 3).iter().enumerate() {
//!     println!("#{} {}: {}% (see a {})", i + 1, m.condition.name, m.percent(), m.condition.specialist);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`access`]: Injectable access gate standing in for login
//! - [`catalog`]: Condition catalog loading and export
//! - [`core`]: Core data types for conditions and confidence levels
//! - [`matching`]: Tokenizer, weighting model and ranking
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON web API

pub mod access;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::{CatalogError, ConditionCatalog};
pub use core::condition::ConditionRecord;
pub use core::types::*;
pub use matching::engine::{MatchingConfig, ScoredMatch, SymptomMatcher, DEFAULT_TOP_K};
pub use matching::model::{MatchError, WeightingModel};
