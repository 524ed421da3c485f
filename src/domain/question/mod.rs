//! Question module - reference data for the elicitation game.
//!
//! Scored questions, incomparable pairs, personality buckets, and the
//! validated catalog that bundles them.

mod bucket;
mod catalog;
mod model;

pub use bucket::{BucketTable, PersonalityBucket};
pub use catalog::QuestionCatalog;
pub use model::{AnswerOption, DimensionDelta, IncomparablePair, ScoredQuestion};
