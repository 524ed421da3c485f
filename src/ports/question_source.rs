//! Question source port.
//!
//! Read-only provider of the validated question catalog. Implementations
//! validate entries on load (zero-option questions are data errors, the
//! bucket table must be disjoint and gap-free) rather than letting
//! malformed payloads reach the arithmetic.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::question::QuestionCatalog;

/// Port for loading the question reference data.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Loads and validates the full catalog.
    ///
    /// # Errors
    ///
    /// - `BucketTableInvalid` if the bucket table overlaps or has gaps
    /// - `MalformedQuestion` for unrecoverable data errors (individual bad
    ///   questions may instead be skipped with a warning)
    async fn load(&self) -> Result<QuestionCatalog, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_source_is_object_safe() {
        fn _accepts_dyn(_source: &dyn QuestionSource) {}
    }
}
