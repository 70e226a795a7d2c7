use serde::Serialize;

use crate::catalog::store::ConditionCatalog;
use crate::core::condition::ConditionRecord;
use crate::core::types::Confidence;
use crate::matching::model::{MatchError, WeightingModel};
use crate::matching::scoring::{cosine, to_percent};

/// Default number of conditions returned by the analyzer
pub const DEFAULT_TOP_K: usize = 3;

/// A reference condition paired with its similarity to a query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch<'a> {
    /// The matched condition
    pub condition: &'a ConditionRecord,

    /// Position of the condition in the reference table
    pub index: usize,

    /// Cosine similarity in `[0, 1]`
    pub score: f64,
}

impl ScoredMatch<'_> {
    /// Score as an integer percentage, `floor(score * 100)`
    #[must_use]
    pub fn percent(&self) -> u32 {
        to_percent(self.score)
    }

    #[must_use]
    pub fn confidence(&self) -> Confidence {
        Confidence::from_score(self.score)
    }

    /// Owned, serializable view of this match at 1-based `rank`
    #[must_use]
    pub fn summary(&self, rank: usize) -> MatchSummary {
        MatchSummary {
            rank,
            id: self.condition.id().0,
            name: self.condition.name.clone(),
            score: self.score,
            percent: self.percent(),
            confidence: self.confidence(),
            specialist: self.condition.specialist.clone(),
            precautions: self.condition.precautions.clone(),
        }
    }
}

/// Serializable match row shared by the CLI JSON output and the web API
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub score: f64,
    pub percent: u32,
    pub confidence: Confidence,
    pub specialist: String,
    pub precautions: String,
}

/// Configuration for the symptom matcher
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Number of conditions returned by [`SymptomMatcher::find_matches`]
    pub top_k: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Ranks reference conditions by lexical similarity to free-text symptoms
///
/// Owns the reference table and the weighting model built from it. Both are
/// immutable after construction, so a matcher can be shared across threads
/// behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct SymptomMatcher {
    records: Vec<ConditionRecord>,
    model: WeightingModel,
    config: MatchingConfig,
}

impl SymptomMatcher {
    /// Build a matcher with default configuration
    ///
    /// # Errors
    ///
    /// Returns `MatchError::Configuration` if `records` is empty or a record
    /// has blank symptom text.
    pub fn new(records: Vec<ConditionRecord>) -> Result<Self, MatchError> {
        Self::with_config(records, MatchingConfig::default())
    }

    /// Build a matcher with custom configuration
    ///
    /// # Errors
    ///
    /// See [`SymptomMatcher::new`].
    pub fn with_config(
        records: Vec<ConditionRecord>,
        config: MatchingConfig,
    ) -> Result<Self, MatchError> {
        let model = WeightingModel::build(&records)?;
        Ok(Self {
            records,
            model,
            config,
        })
    }

    /// Build a matcher over every condition in a catalog
    ///
    /// # Errors
    ///
    /// See [`SymptomMatcher::new`].
    pub fn from_catalog(catalog: &ConditionCatalog) -> Result<Self, MatchError> {
        Self::new(catalog.conditions.clone())
    }

    /// Rank the reference conditions against free-text symptoms.
    ///
    /// Blank queries return no results. Otherwise returns the first
    /// `min(top_k, N)` conditions by descending score; equal scores keep
    /// table order. A query with no known token scores 0.0 everywhere.
    #[must_use]
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<ScoredMatch<'_>> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let query_vector = self.model.vectorize(query);

        let mut results: Vec<ScoredMatch<'_>> = self
            .records
            .iter()
            .zip(self.model.vectors())
            .enumerate()
            .map(|(index, (condition, vector))| ScoredMatch {
                condition,
                index,
                score: cosine(&query_vector, vector),
            })
            .collect();

        // Stable sort: ties keep table order
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        tracing::trace!(
            query,
            top_k,
            best = results.first().map(|m| m.condition.name.as_str()),
            "ranked query"
        );

        results
    }

    /// Rank with the configured `top_k`
    #[must_use]
    pub fn find_matches(&self, query: &str) -> Vec<ScoredMatch<'_>> {
        self.rank(query, self.config.top_k)
    }

    /// The single best condition for a query, if the query is not blank
    #[must_use]
    pub fn best_match(&self, query: &str) -> Option<ScoredMatch<'_>> {
        self.rank(query, 1).into_iter().next()
    }

    /// The reference table, in table order
    #[must_use]
    pub fn records(&self) -> &[ConditionRecord] {
        &self.records
    }

    #[must_use]
    pub fn model(&self) -> &WeightingModel {
        &self.model
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }
}
