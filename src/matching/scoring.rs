use std::collections::BTreeMap;

/// Safely convert a count to f64 for weighting and percentage calculations
///
/// Token counts and table sizes are tiny, so the precision loss that clippy
/// warns about for large `usize` values cannot occur here.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Sparse weight vector over the model vocabulary
///
/// Entries are `(term index, weight)` pairs sorted by term index with no
/// duplicates, so every reduction runs in a fixed order and yields bit-identical
/// results for identical inputs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Weight raw term counts by their IDF: `tf(t) * idf(t)`
    pub(crate) fn from_counts(counts: &BTreeMap<usize, usize>, idf: &[f64]) -> Self {
        let entries = counts
            .iter()
            .map(|(&term, &tf)| (term, count_to_f64(tf) * idf[term]))
            .collect();
        Self { entries }
    }

    /// Euclidean norm
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Divide by the Euclidean norm. The zero vector stays zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return Self::default();
        }
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(term, w)| (term, w / norm))
                .collect(),
        }
    }

    /// Dot product by merging the two sorted entry lists
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_w) = self.entries[i];
            let (b_term, b_w) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }
}

/// Cosine similarity of two L2-normalized vectors, clamped into `[0, 1]`
///
/// Weights are non-negative so the true value is never below zero; the clamp
/// only absorbs floating-point overshoot past 1.0 for identical vectors.
#[must_use]
pub fn cosine(query: &SparseVector, reference: &SparseVector) -> f64 {
    if query.is_zero() || reference.is_zero() {
        return 0.0;
    }
    query.dot(reference).clamp(0.0, 1.0)
}

/// Integer percentage `floor(score * 100)` for display
#[must_use]
pub fn to_percent(score: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Score is 0-1
    {
        (score.clamp(0.0, 1.0) * 100.0).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(usize, f64)]) -> SparseVector {
        SparseVector {
            entries: entries.to_vec(),
        }
    }

    #[test]
    fn test_from_counts_weights_by_idf() {
        let counts = BTreeMap::from([(0, 2), (2, 1)]);
        let idf = [1.5, 9.0, 2.0];
        let v = SparseVector::from_counts(&counts, &idf);
        assert_eq!(v.entries(), &[(0, 3.0), (2, 2.0)]);
    }

    #[test]
    fn test_normalized_has_unit_norm() {
        let v = vector(&[(0, 3.0), (4, 4.0)]).normalized();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert_eq!(v.entries(), &[(0, 0.6), (4, 0.8)]);
    }

    #[test]
    fn test_normalized_zero_vector() {
        let v = SparseVector::default().normalized();
        assert!(v.is_zero());
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn test_dot_disjoint_and_overlapping() {
        let a = vector(&[(0, 1.0), (3, 2.0), (5, 1.0)]);
        let b = vector(&[(1, 4.0), (3, 3.0), (5, 2.0)]);
        assert_eq!(a.dot(&b), 8.0);

        let c = vector(&[(2, 1.0)]);
        assert_eq!(a.dot(&c), 0.0);
    }

    #[test]
    fn test_cosine_zero_query() {
        let reference = vector(&[(0, 1.0)]);
        assert_eq!(cosine(&SparseVector::default(), &reference), 0.0);
    }

    #[test]
    fn test_cosine_clamps_overshoot() {
        let a = vector(&[(0, 1.000_000_1)]);
        assert_eq!(cosine(&a, &a), 1.0);
    }

    #[test]
    fn test_to_percent_floors() {
        assert_eq!(to_percent(0.0), 0);
        assert_eq!(to_percent(0.5299), 52);
        assert_eq!(to_percent(0.999_999), 99);
        assert_eq!(to_percent(1.0), 100);
    }
}
