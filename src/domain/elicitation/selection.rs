//! Pluggable selection strategies for the scored-question pool.
//!
//! The sequencer filters the pool against the answered set and hands the
//! remainder to a strategy. Production uses the shuffled strategy; tests
//! inject fixed order for determinism.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::question::ScoredQuestion;

/// Orders the unanswered scored-question pool for presentation.
pub trait SelectionStrategy: Send + Sync {
    fn order(&self, questions: Vec<ScoredQuestion>) -> Vec<ScoredQuestion>;
}

/// Presents questions in catalog order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrder;

impl SelectionStrategy for FixedOrder {
    fn order(&self, questions: Vec<ScoredQuestion>) -> Vec<ScoredQuestion> {
        questions
    }
}

/// Presents questions in uniform-random order.
///
/// A seed may be pinned for reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct Shuffled {
    seed: Option<u64>,
}

impl Shuffled {
    /// Shuffle with entropy from the OS.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Shuffle deterministically from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Default for Shuffled {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for Shuffled {
    fn order(&self, mut questions: Vec<ScoredQuestion>) -> Vec<ScoredQuestion> {
        let mut rng: StdRng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::thread_rng().gen()),
        };
        questions.shuffle(&mut rng);
        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;
    use crate::domain::question::AnswerOption;

    fn questions(n: usize) -> Vec<ScoredQuestion> {
        (0..n)
            .map(|i| {
                ScoredQuestion::new(
                    QuestionId::new(format!("q{}", i)).unwrap(),
                    "text",
                    "lifestyle",
                    vec![AnswerOption::new("Yes", vec![])],
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn fixed_order_preserves_input_order() {
        let input = questions(5);
        let ordered = FixedOrder.order(input.clone());
        assert_eq!(ordered, input);
    }

    #[test]
    fn shuffled_keeps_the_same_set() {
        let input = questions(10);
        let ordered = Shuffled::with_seed(42).order(input.clone());
        assert_eq!(ordered.len(), input.len());
        for q in &input {
            assert!(ordered.contains(q));
        }
    }

    #[test]
    fn shuffled_with_same_seed_is_deterministic() {
        let input = questions(10);
        let a = Shuffled::with_seed(7).order(input.clone());
        let b = Shuffled::with_seed(7).order(input);
        assert_eq!(a, b);
    }
}
