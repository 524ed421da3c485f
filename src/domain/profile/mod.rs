//! Profile module - the scoring accumulator's dimension map.
//!
//! A `DimensionProfile` holds one running score per dimension. Applying an
//! answer's deltas is a pure additive fold: addition is commutative and
//! associative, so the order deltas arrive in never changes the final map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::question::DimensionDelta;

/// Per-user mapping from dimension name to running numeric score.
///
/// Scores accumulate additively and are never replaced, except by an
/// explicit [`reset`](DimensionProfile::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionProfile {
    scores: BTreeMap<String, i32>,
}

impl DimensionProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes a profile from persisted dimension rows.
    pub fn from_rows(rows: impl IntoIterator<Item = (String, i32)>) -> Self {
        Self {
            scores: rows.into_iter().collect(),
        }
    }

    /// Applies one answer's deltas: `score[dim] = (score[dim] or 0) + value`.
    pub fn apply(&mut self, deltas: &[DimensionDelta]) {
        for delta in deltas {
            *self.scores.entry(delta.dimension.clone()).or_insert(0) += delta.value;
        }
    }

    /// Returns the score for a dimension, or None if never touched.
    pub fn score(&self, dimension: &str) -> Option<i32> {
        self.scores.get(dimension).copied()
    }

    /// Returns the sum of all dimension scores, used for bucket lookup.
    pub fn total(&self) -> i32 {
        self.scores.values().sum()
    }

    /// Returns true when no dimension has been touched.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns the number of live dimensions.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Iterates dimension rows in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Clears every dimension (explicit profile reset).
    pub fn reset(&mut self) {
        self.scores.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn delta(dimension: &str, value: i32) -> DimensionDelta {
        DimensionDelta::new(dimension, value).unwrap()
    }

    #[test]
    fn apply_creates_dimension_on_first_contribution() {
        let mut profile = DimensionProfile::new();
        profile.apply(&[delta("Tidy", 2)]);
        assert_eq!(profile.score("Tidy"), Some(2));
    }

    #[test]
    fn apply_accumulates_instead_of_replacing() {
        let mut profile = DimensionProfile::new();
        profile.apply(&[delta("Tidy", 2)]);
        profile.apply(&[delta("Tidy", -1)]);
        assert_eq!(profile.score("Tidy"), Some(1));
    }

    #[test]
    fn untouched_dimension_has_no_score() {
        let profile = DimensionProfile::new();
        assert_eq!(profile.score("Tidy"), None);
        assert!(profile.is_empty());
    }

    #[test]
    fn total_sums_all_dimensions() {
        let mut profile = DimensionProfile::new();
        profile.apply(&[delta("Tidy", 3), delta("Social", -1)]);
        assert_eq!(profile.total(), 2);
    }

    #[test]
    fn reset_clears_all_dimensions() {
        let mut profile = DimensionProfile::new();
        profile.apply(&[delta("Tidy", 3)]);
        profile.reset();
        assert!(profile.is_empty());
        assert_eq!(profile.total(), 0);
    }

    #[test]
    fn from_rows_reconstitutes_persisted_scores() {
        let profile = DimensionProfile::from_rows(vec![
            ("Tidy".to_string(), 4),
            ("Social".to_string(), -2),
        ]);
        assert_eq!(profile.score("Tidy"), Some(4));
        assert_eq!(profile.total(), 2);
    }

    proptest! {
        /// The final score per dimension equals the sum of its deltas,
        /// regardless of application order.
        #[test]
        fn apply_is_order_independent(
            values in prop::collection::vec((0usize..4, -10i32..=10), 0..40)
        ) {
            let dims = ["A", "B", "C", "D"];
            let deltas: Vec<DimensionDelta> = values
                .iter()
                .map(|(d, v)| delta(dims[*d], *v))
                .collect();

            let mut forward = DimensionProfile::new();
            for d in &deltas {
                forward.apply(std::slice::from_ref(d));
            }

            let mut reversed = DimensionProfile::new();
            for d in deltas.iter().rev() {
                reversed.apply(std::slice::from_ref(d));
            }

            let mut batched = DimensionProfile::new();
            batched.apply(&deltas);

            prop_assert_eq!(&forward, &reversed);
            prop_assert_eq!(&forward, &batched);

            for dim in dims {
                let expected: i32 = deltas
                    .iter()
                    .filter(|d| d.dimension == dim)
                    .map(|d| d.value)
                    .sum();
                let got = forward.score(dim).unwrap_or(0);
                prop_assert_eq!(got, expected);
            }
        }
    }
}
