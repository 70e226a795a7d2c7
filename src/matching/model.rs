use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::core::condition::ConditionRecord;
use crate::matching::scoring::{count_to_f64, SparseVector};
use crate::matching::tokenize::tokenize;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// TF-IDF weights learned from the reference table
///
/// Built once from every record's symptom text and immutable afterwards. The
/// vocabulary is exactly the set of tokens in the table; term indices follow
/// the sorted token order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightingModel {
    /// Token -> term index
    vocabulary: BTreeMap<String, usize>,

    /// Smoothed IDF per term index
    idf: Vec<f64>,

    /// L2-normalized vector per record, in table order
    vectors: Vec<SparseVector>,
}

impl WeightingModel {
    /// Learn IDF weights and record vectors from the reference table.
    ///
    /// `idf(t) = ln((1 + N) / (1 + df(t))) + 1`, where `N` is the number of
    /// records and `df(t)` the number of records containing `t`. Each record
    /// vector is `tf * idf` per token, L2-normalized.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::Configuration` if `records` is empty or any record
    /// has blank symptom text.
    pub fn build(records: &[ConditionRecord]) -> Result<Self, MatchError> {
        if records.is_empty() {
            return Err(MatchError::Configuration(
                "reference table is empty".to_string(),
            ));
        }

        let tokenized: Vec<Vec<String>> = records.iter().map(|r| tokenize(&r.symptoms)).collect();

        if let Some(index) = tokenized.iter().position(Vec::is_empty) {
            return Err(MatchError::Configuration(format!(
                "condition '{}' (index {index}) has blank symptom text",
                records[index].name
            )));
        }

        let vocabulary: BTreeMap<String, usize> = tokenized
            .iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(term, token)| (token.clone(), term))
            .collect();

        // Document frequency: count each token once per record
        let mut df = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let distinct: BTreeSet<usize> = tokens.iter().map(|t| vocabulary[t]).collect();
            for term in distinct {
                df[term] += 1;
            }
        }

        let n = count_to_f64(records.len());
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + count_to_f64(d))).ln() + 1.0)
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                let counts = count_terms(tokens.iter().filter_map(|t| vocabulary.get(t)));
                SparseVector::from_counts(&counts, &idf).normalized()
            })
            .collect();

        tracing::debug!(
            "Built weighting model: {} records, {} vocabulary terms",
            records.len(),
            vocabulary.len()
        );

        Ok(Self {
            vocabulary,
            idf,
            vectors,
        })
    }

    /// Vectorize free text with the learned weights.
    ///
    /// Tokens outside the vocabulary are ignored; text with no known token
    /// maps to the zero vector.
    #[must_use]
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let tokens = tokenize(text);
        let counts = count_terms(tokens.iter().filter_map(|t| self.vocabulary.get(t.as_str())));
        SparseVector::from_counts(&counts, &self.idf).normalized()
    }

    /// IDF weight of a token, if it is in the vocabulary
    #[must_use]
    pub fn idf(&self, token: &str) -> Option<f64> {
        self.vocabulary.get(token).map(|&term| self.idf[term])
    }

    /// Stored vector for the record at `index`
    #[must_use]
    pub fn vector(&self, index: usize) -> Option<&SparseVector> {
        self.vectors.get(index)
    }

    /// All record vectors in table order
    #[must_use]
    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    /// Vocabulary tokens in term-index order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of records the model was built from
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

fn count_terms<'a>(terms: impl Iterator<Item = &'a usize>) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for &term in terms {
        *counts.entry(term).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::ConditionCatalog;

    fn embedded_records() -> Vec<ConditionRecord> {
        ConditionCatalog::load_embedded().unwrap().conditions
    }

    #[test]
    fn test_build_empty_table() {
        let err = WeightingModel::build(&[]).unwrap_err();
        assert!(matches!(err, MatchError::Configuration(_)));
    }

    #[test]
    fn test_build_blank_symptoms() {
        let records = vec![
            ConditionRecord::new("Flu", "fever cough", "GP", "Rest"),
            ConditionRecord::new("Ghost", "   ", "Nobody", "None"),
        ];
        let err = WeightingModel::build(&records).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Ghost"), "unexpected message: {message}");
        assert!(message.contains("index 1"));
    }

    #[test]
    fn test_vocabulary_is_table_tokens() {
        let model = WeightingModel::build(&embedded_records()).unwrap();
        let vocab: Vec<&str> = model.vocabulary().collect();

        assert_eq!(model.vocabulary_len(), 19);
        assert_eq!(vocab.first(), Some(&"blurred"));
        assert!(vocab.contains(&"breathlessness"));
        assert!(!vocab.contains(&"paracetamol"));
        assert_eq!(model.len(), 6);
    }

    #[test]
    fn test_idf_smoothing() {
        let model = WeightingModel::build(&embedded_records()).unwrap();

        // "thirst" appears in one record, "chest" in three, "fever" in two
        let unique = (7.0f64 / 2.0).ln() + 1.0;
        let chest = (7.0f64 / 4.0).ln() + 1.0;
        let fever = (7.0f64 / 3.0).ln() + 1.0;
        assert!((model.idf("thirst").unwrap() - unique).abs() < 1e-12);
        assert!((model.idf("chest").unwrap() - chest).abs() < 1e-12);
        assert!((model.idf("fever").unwrap() - fever).abs() < 1e-12);
        assert!(model.idf("zzzz").is_none());
    }

    #[test]
    fn test_record_vectors_are_normalized() {
        let model = WeightingModel::build(&embedded_records()).unwrap();
        for vector in model.vectors() {
            assert!((vector.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let records = embedded_records();
        let first = WeightingModel::build(&records).unwrap();
        let second = WeightingModel::build(&records).unwrap();
        assert_eq!(first, second);

        for (a, b) in first.vectors().iter().zip(second.vectors()) {
            for ((ta, wa), (tb, wb)) in a.entries().iter().zip(b.entries()) {
                assert_eq!(ta, tb);
                assert_eq!(wa.to_bits(), wb.to_bits());
            }
        }
    }

    #[test]
    fn test_term_frequency_counts_repeats() {
        let records = vec![
            ConditionRecord::new("A", "cough cough fever", "GP", "Rest"),
            ConditionRecord::new("B", "fever", "GP", "Rest"),
        ];
        let model = WeightingModel::build(&records).unwrap();

        // cough: df 1, tf 2; fever: df 2, tf 1
        let cough = model.idf("cough").unwrap();
        let fever = model.idf("fever").unwrap();
        let raw_norm = ((2.0 * cough).powi(2) + fever.powi(2)).sqrt();

        let vector = model.vector(0).unwrap();
        let cough_term = model.vocabulary().position(|t| t == "cough").unwrap();
        let weight = vector
            .entries()
            .iter()
            .find(|(term, _)| *term == cough_term)
            .map(|(_, w)| *w)
            .unwrap();
        assert!((weight - 2.0 * cough / raw_norm).abs() < 1e-12);
    }

    #[test]
    fn test_vectorize_unknown_tokens() {
        let model = WeightingModel::build(&embedded_records()).unwrap();
        assert!(model.vectorize("zzzznonexistentword").is_zero());
        assert!(model.vectorize("").is_zero());

        let partly_known = model.vectorize("fever zzzz");
        assert_eq!(partly_known.entries().len(), 1);
        assert!((partly_known.norm() - 1.0).abs() < 1e-12);
    }
}
