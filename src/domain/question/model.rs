//! Question reference data: scored questions and incomparable pairs.
//!
//! Both families are immutable once loaded. Scored questions carry a
//! numeric payload (dimension deltas per option); incomparable pairs carry
//! none - answering one records only the raw choice.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};

/// A single contribution an answer option makes to one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionDelta {
    /// Named axis of the compatibility model (e.g. "Adventurous").
    pub dimension: String,
    /// Signed contribution added to the running score for that axis.
    pub value: i32,
}

impl DimensionDelta {
    /// Creates a delta, rejecting an empty dimension name.
    pub fn new(dimension: impl Into<String>, value: i32) -> Result<Self, DomainError> {
        let dimension = dimension.into();
        if dimension.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::MalformedQuestion,
                "Dimension delta references an empty dimension name",
            ));
        }
        Ok(Self { dimension, value })
    }
}

/// One selectable option on a scored question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Text shown to the user.
    pub text: String,
    /// Zero or more dimension contributions applied when chosen.
    pub deltas: Vec<DimensionDelta>,
}

impl AnswerOption {
    /// Creates an option with its deltas.
    pub fn new(text: impl Into<String>, deltas: Vec<DimensionDelta>) -> Self {
        Self {
            text: text.into(),
            deltas,
        }
    }
}

/// A fixed dimension-scored question.
///
/// # Invariants
///
/// - At least one option (a zero-option question is malformed).
/// - Every option's deltas name non-empty dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredQuestion {
    id: QuestionId,
    text: String,
    category: String,
    options: Vec<AnswerOption>,
}

impl ScoredQuestion {
    /// Creates a validated scored question.
    ///
    /// # Errors
    ///
    /// - `MalformedQuestion` if there are no options or a delta names an
    ///   empty dimension
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        category: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Result<Self, DomainError> {
        if options.is_empty() {
            return Err(DomainError::new(
                ErrorCode::MalformedQuestion,
                format!("Question '{}' has no options", id),
            ));
        }
        for option in &options {
            for delta in &option.deltas {
                if delta.dimension.trim().is_empty() {
                    return Err(DomainError::new(
                        ErrorCode::MalformedQuestion,
                        format!("Question '{}' has a delta with an empty dimension", id),
                    ));
                }
            }
        }
        Ok(Self {
            id,
            text: text.into(),
            category: category.into(),
            options,
        })
    }

    /// Returns the question id.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Returns the question text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the question category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the answer options.
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Finds the option whose text matches the chosen value.
    pub fn option_by_text(&self, text: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.text == text)
    }
}

/// A forced choice between two unrelated items.
///
/// No scoring payload: answering records the raw choice and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomparablePair {
    id: QuestionId,
    category: String,
    item_a: String,
    item_b: String,
}

impl IncomparablePair {
    /// Creates a validated incomparable pair.
    ///
    /// # Errors
    ///
    /// - `MalformedQuestion` if either item is empty
    pub fn new(
        id: QuestionId,
        category: impl Into<String>,
        item_a: impl Into<String>,
        item_b: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let item_a = item_a.into();
        let item_b = item_b.into();
        if item_a.trim().is_empty() || item_b.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::MalformedQuestion,
                format!("Incomparable pair '{}' has an empty item", id),
            ));
        }
        Ok(Self {
            id,
            category: category.into(),
            item_a,
            item_b,
        })
    }

    /// Returns the pair id.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Returns the pair category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the first item.
    pub fn item_a(&self) -> &str {
        &self.item_a
    }

    /// Returns the second item.
    pub fn item_b(&self) -> &str {
        &self.item_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[test]
    fn scored_question_accepts_valid_options() {
        let question = ScoredQuestion::new(
            qid("tidy-01"),
            "Dishes in the sink overnight?",
            "lifestyle",
            vec![
                AnswerOption::new("Never", vec![DimensionDelta::new("Tidy", 2).unwrap()]),
                AnswerOption::new("Sometimes", vec![]),
            ],
        )
        .unwrap();
        assert_eq!(question.options().len(), 2);
    }

    #[test]
    fn scored_question_rejects_zero_options() {
        let result = ScoredQuestion::new(qid("bad-01"), "No options", "lifestyle", vec![]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::MalformedQuestion);
    }

    #[test]
    fn scored_question_rejects_empty_dimension_in_delta() {
        let result = ScoredQuestion::new(
            qid("bad-02"),
            "Bad delta",
            "lifestyle",
            vec![AnswerOption::new(
                "Option",
                vec![DimensionDelta {
                    dimension: "  ".to_string(),
                    value: 1,
                }],
            )],
        );
        assert!(result.is_err());
    }

    #[test]
    fn scored_question_option_with_zero_deltas_is_valid() {
        let question = ScoredQuestion::new(
            qid("neutral-01"),
            "Neutral question",
            "lifestyle",
            vec![AnswerOption::new("Meh", vec![])],
        );
        assert!(question.is_ok());
    }

    #[test]
    fn option_by_text_finds_matching_option() {
        let question = ScoredQuestion::new(
            qid("tidy-01"),
            "Dishes?",
            "lifestyle",
            vec![AnswerOption::new(
                "Never",
                vec![DimensionDelta::new("Tidy", 2).unwrap()],
            )],
        )
        .unwrap();
        assert!(question.option_by_text("Never").is_some());
        assert!(question.option_by_text("Always").is_none());
    }

    #[test]
    fn dimension_delta_rejects_empty_dimension() {
        assert!(DimensionDelta::new("", 1).is_err());
    }

    #[test]
    fn incomparable_pair_accepts_two_items() {
        let pair =
            IncomparablePair::new(qid("inc-01"), "random", "A tiny dragon", "A talking cactus")
                .unwrap();
        assert_eq!(pair.item_a(), "A tiny dragon");
        assert_eq!(pair.item_b(), "A talking cactus");
    }

    #[test]
    fn incomparable_pair_rejects_empty_item() {
        let result = IncomparablePair::new(qid("inc-02"), "random", "", "Something");
        assert!(result.is_err());
    }
}
