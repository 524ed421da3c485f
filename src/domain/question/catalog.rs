//! The validated question catalog.
//!
//! A catalog bundles the two question families with the bucket table and
//! guards the id namespace: scored questions and incomparable pairs share
//! one id space, so duplicates are rejected at load time.

use std::collections::HashSet;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};

use super::bucket::{BucketTable, PersonalityBucket};
use super::model::{IncomparablePair, ScoredQuestion};

/// Immutable, validated question reference data.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    scored: Vec<ScoredQuestion>,
    incomparables: Vec<IncomparablePair>,
    buckets: BucketTable,
}

impl QuestionCatalog {
    /// Builds a catalog, rejecting duplicate question ids.
    ///
    /// An empty scored-question list is valid: the sequencer completes
    /// immediately with an empty profile.
    ///
    /// # Errors
    ///
    /// - `MalformedQuestion` if two entries share an id
    pub fn new(
        scored: Vec<ScoredQuestion>,
        incomparables: Vec<IncomparablePair>,
        buckets: BucketTable,
    ) -> Result<Self, DomainError> {
        let mut seen: HashSet<&QuestionId> = HashSet::new();
        for id in scored
            .iter()
            .map(|q| q.id())
            .chain(incomparables.iter().map(|p| p.id()))
        {
            if !seen.insert(id) {
                return Err(DomainError::new(
                    ErrorCode::MalformedQuestion,
                    format!("Duplicate question id '{}'", id),
                ));
            }
        }
        Ok(Self {
            scored,
            incomparables,
            buckets,
        })
    }

    /// Returns the scored questions.
    pub fn scored_questions(&self) -> &[ScoredQuestion] {
        &self.scored
    }

    /// Returns the incomparable pairs.
    pub fn incomparable_pairs(&self) -> &[IncomparablePair] {
        &self.incomparables
    }

    /// Returns the bucket table.
    pub fn bucket_table(&self) -> &BucketTable {
        &self.buckets
    }

    /// Finds a scored question by id.
    pub fn scored_by_id(&self, id: &QuestionId) -> Option<&ScoredQuestion> {
        self.scored.iter().find(|q| q.id() == id)
    }

    /// Looks up the personality bucket for an accumulated score.
    ///
    /// # Errors
    ///
    /// - `BucketLookupFailed` if the score falls outside every range
    pub fn lookup_bucket(&self, score: i32) -> Result<&PersonalityBucket, DomainError> {
        self.buckets.lookup(score)
    }
}
