//! Symptom matching engine and scoring.
//!
//! - [`SymptomMatcher`]: Main entry point, ranks conditions for a query
//! - [`WeightingModel`]: TF-IDF weights learned once from the reference table
//! - [`ScoredMatch`]: A condition paired with its similarity score
//!
//! ## Matching Algorithm
//!
//! 1. **Tokenize**: lowercase, split on whitespace and punctuation
//! 2. **Weight**: smoothed IDF, `ln((1 + N) / (1 + df)) + 1`, times raw term count
//! 3. **Normalize**: every vector is divided by its Euclidean norm
//! 4. **Score**: cosine similarity, which is the dot product of unit vectors
//! 5. **Rank**: stable sort by descending score, ties keep table order
//!
//! The analyzer and quick-scan views are the same [`SymptomMatcher::rank`] call
//! with `top_k = 3` and `top_k = 1`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_matcher::{ConditionCatalog, SymptomMatcher};
//!
//! let catalog = ConditionCatalog::load_embedded().unwrap();
//! let matcher = SymptomMatcher::from_catalog(&catalog).unwrap();
//!
//! for m in matcher.rank("fever, cough, chest pain", 3) {
//!     println!("{}: {}% -> {}", m.condition.name, m.percent(), m.condition.specialist);
//! }
//! ```
//!
//! [`WeightingModel`]: model::WeightingModel
//! [`SymptomMatcher`]: engine::SymptomMatcher
//! [`SymptomMatcher::rank`]: engine::SymptomMatcher::rank
//! [`ScoredMatch`]: engine::ScoredMatch

pub mod engine;
pub mod model;
pub mod scoring;
pub mod tokenize;

pub use model::MatchError;
