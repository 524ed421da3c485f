//! Personality buckets and the validated bucket table.
//!
//! Buckets map closed score ranges to personality descriptors. The table is
//! hand-authored reference data, so the invariants (disjoint ranges, no gaps
//! across the covered span) are enforced at construction instead of assumed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// A named personality descriptor for a closed score range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityBucket {
    pub name: String,
    pub min_score: i32,
    pub max_score: i32,
    pub description: String,
    pub special_power: String,
    pub quote: String,
}

impl PersonalityBucket {
    /// Returns true when the score falls inside this bucket (inclusive).
    pub fn contains(&self, score: i32) -> bool {
        self.min_score <= score && score <= self.max_score
    }
}

/// Validated, ordered collection of personality buckets.
///
/// # Invariants
///
/// - At least one bucket.
/// - Every bucket has `min_score <= max_score`.
/// - Sorted ranges are disjoint and contiguous: each bucket starts exactly
///   one above the previous bucket's max, so the covered span has no gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTable {
    buckets: Vec<PersonalityBucket>,
}

impl BucketTable {
    /// Builds a validated bucket table.
    ///
    /// # Errors
    ///
    /// - `BucketTableInvalid` if the table is empty, a range is inverted,
    ///   or the sorted ranges overlap or leave gaps
    pub fn new(mut buckets: Vec<PersonalityBucket>) -> Result<Self, DomainError> {
        if buckets.is_empty() {
            return Err(DomainError::new(
                ErrorCode::BucketTableInvalid,
                "Bucket table is empty",
            ));
        }

        for bucket in &buckets {
            if bucket.min_score > bucket.max_score {
                return Err(DomainError::new(
                    ErrorCode::BucketTableInvalid,
                    format!(
                        "Bucket '{}' has inverted range {}..={}",
                        bucket.name, bucket.min_score, bucket.max_score
                    ),
                ));
            }
        }

        buckets.sort_by_key(|b| b.min_score);

        for pair in buckets.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.min_score <= prev.max_score {
                return Err(DomainError::new(
                    ErrorCode::BucketTableInvalid,
                    format!("Buckets '{}' and '{}' overlap", prev.name, next.name),
                ));
            }
            if next.min_score != prev.max_score + 1 {
                return Err(DomainError::new(
                    ErrorCode::BucketTableInvalid,
                    format!(
                        "Gap between buckets '{}' and '{}' ({}..{})",
                        prev.name, next.name, prev.max_score, next.min_score
                    ),
                ));
            }
        }

        Ok(Self { buckets })
    }

    /// Returns the buckets in ascending range order.
    pub fn buckets(&self) -> &[PersonalityBucket] {
        &self.buckets
    }

    /// Lowest score covered by the table.
    pub fn min_covered(&self) -> i32 {
        self.buckets[0].min_score
    }

    /// Highest score covered by the table.
    pub fn max_covered(&self) -> i32 {
        self.buckets[self.buckets.len() - 1].max_score
    }

    /// Looks up the bucket for an accumulated score (inclusive range match).
    ///
    /// A miss is a distinct failure, never a silent default: it signals a
    /// data bug or an out-of-range accumulation.
    ///
    /// # Errors
    ///
    /// - `BucketLookupFailed` if the score falls outside every range
    pub fn lookup(&self, score: i32) -> Result<&PersonalityBucket, DomainError> {
        self.buckets
            .iter()
            .find(|b| b.contains(score))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::BucketLookupFailed,
                    format!(
                        "Score {} falls outside the covered domain {}..={}",
                        score,
                        self.min_covered(),
                        self.max_covered()
                    ),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(name: &str, min: i32, max: i32) -> PersonalityBucket {
        PersonalityBucket {
            name: name.to_string(),
            min_score: min,
            max_score: max,
            description: format!("{} description", name),
            special_power: "Power".to_string(),
            quote: "Quote".to_string(),
        }
    }

    fn valid_table() -> BucketTable {
        BucketTable::new(vec![
            bucket("Low", -10, -1),
            bucket("Mid", 0, 9),
            bucket("High", 10, 20),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_finds_bucket_for_covered_score() {
        let table = valid_table();
        assert_eq!(table.lookup(0).unwrap().name, "Mid");
        assert_eq!(table.lookup(9).unwrap().name, "Mid");
        assert_eq!(table.lookup(10).unwrap().name, "High");
        assert_eq!(table.lookup(-10).unwrap().name, "Low");
    }

    #[test]
    fn lookup_fails_outside_covered_domain() {
        let table = valid_table();
        let err = table.lookup(21).unwrap_err();
        assert_eq!(err.code, ErrorCode::BucketLookupFailed);
        assert!(table.lookup(-11).is_err());
    }

    #[test]
    fn lookup_never_matches_more_than_one_bucket() {
        let table = valid_table();
        for score in -10..=20 {
            let matches = table.buckets().iter().filter(|b| b.contains(score)).count();
            assert_eq!(matches, 1, "score {} matched {} buckets", score, matches);
        }
    }

    #[test]
    fn new_rejects_empty_table() {
        let result = BucketTable::new(vec![]);
        assert_eq!(result.unwrap_err().code, ErrorCode::BucketTableInvalid);
    }

    #[test]
    fn new_rejects_inverted_range() {
        let result = BucketTable::new(vec![bucket("Bad", 5, 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_overlapping_ranges() {
        let result = BucketTable::new(vec![bucket("A", 0, 10), bucket("B", 10, 20)]);
        assert_eq!(result.unwrap_err().code, ErrorCode::BucketTableInvalid);
    }

    #[test]
    fn new_rejects_gap_between_ranges() {
        let result = BucketTable::new(vec![bucket("A", 0, 10), bucket("B", 12, 20)]);
        assert_eq!(result.unwrap_err().code, ErrorCode::BucketTableInvalid);
    }

    #[test]
    fn new_sorts_buckets_regardless_of_input_order() {
        let table = BucketTable::new(vec![bucket("High", 10, 20), bucket("Low", 0, 9)]).unwrap();
        assert_eq!(table.buckets()[0].name, "Low");
        assert_eq!(table.min_covered(), 0);
        assert_eq!(table.max_covered(), 20);
    }
}
