//! Built-in question pool.
//!
//! The shipped roommate-compatibility bank, used when no external YAML
//! bank is configured. Kept small enough to finish in one sitting.

use crate::domain::foundation::{DomainError, QuestionId};
use crate::domain::question::{
    AnswerOption, BucketTable, DimensionDelta, IncomparablePair, PersonalityBucket,
    QuestionCatalog, ScoredQuestion,
};

fn delta(dimension: &str, value: i32) -> Result<DimensionDelta, DomainError> {
    DimensionDelta::new(dimension, value)
}

fn question(
    id: &str,
    text: &str,
    category: &str,
    options: Vec<AnswerOption>,
) -> Result<ScoredQuestion, DomainError> {
    ScoredQuestion::new(QuestionId::new(id)?, text, category, options)
}

fn pair(id: &str, category: &str, a: &str, b: &str) -> Result<IncomparablePair, DomainError> {
    IncomparablePair::new(QuestionId::new(id)?, category, a, b)
}

fn bucket(
    name: &str,
    min_score: i32,
    max_score: i32,
    description: &str,
    special_power: &str,
    quote: &str,
) -> PersonalityBucket {
    PersonalityBucket {
        name: name.to_string(),
        min_score,
        max_score,
        description: description.to_string(),
        special_power: special_power.to_string(),
        quote: quote.to_string(),
    }
}

/// Builds the shipped catalog.
///
/// # Errors
///
/// Only on a defect in the authored data itself; a passing
/// `default_catalog_is_valid` test makes this unreachable at runtime.
pub fn default_catalog() -> Result<QuestionCatalog, DomainError> {
    let scored = vec![
        question(
            "tidy-01",
            "Dishes left in the sink overnight?",
            "lifestyle",
            vec![
                AnswerOption::new("Absolutely not", vec![delta("Tidy", 2)?]),
                AnswerOption::new("Once in a while is fine", vec![delta("Tidy", 0)?]),
                AnswerOption::new("They'll soak, it's a technique", vec![delta("Tidy", -2)?]),
            ],
        )?,
        question(
            "social-01",
            "Your ideal Friday night at the flat is...",
            "social",
            vec![
                AnswerOption::new("Friends over, music on", vec![delta("Social", 2)?]),
                AnswerOption::new("One or two people, board games", vec![delta("Social", 1)?]),
                AnswerOption::new("Headphones and a closed door", vec![delta("Social", -2)?]),
            ],
        )?,
        question(
            "night-01",
            "When does your day actually start?",
            "rhythm",
            vec![
                AnswerOption::new("Before the sun", vec![delta("NightOwl", -2)?]),
                AnswerOption::new("A civilized mid-morning", vec![delta("NightOwl", 0)?]),
                AnswerOption::new("Noon is a suggestion", vec![delta("NightOwl", 2)?]),
            ],
        )?,
        question(
            "noise-01",
            "A roommate practices trombone at 9pm. You...",
            "lifestyle",
            vec![
                AnswerOption::new("Join in on kazoo", vec![delta("Chill", 2)?, delta("Social", 1)?]),
                AnswerOption::new("Ask them to wrap up by ten", vec![delta("Chill", 0)?]),
                AnswerOption::new("Draft a noise schedule", vec![delta("Chill", -2)?, delta("Tidy", 1)?]),
            ],
        )?,
        question(
            "adventure-01",
            "Spontaneous weekend road trip?",
            "personality",
            vec![
                AnswerOption::new("Already packing", vec![delta("Adventurous", 2)?]),
                AnswerOption::new("Give me a day's notice", vec![delta("Adventurous", 0)?]),
                AnswerOption::new("My couch is a destination", vec![delta("Adventurous", -2)?]),
            ],
        )?,
        question(
            "kitchen-01",
            "Shared groceries or strict shelf borders?",
            "lifestyle",
            vec![
                AnswerOption::new("Everything communal", vec![delta("Social", 2)?, delta("Chill", 1)?]),
                AnswerOption::new("Staples shared, treats labeled", vec![delta("Social", 0)?]),
                AnswerOption::new("My shelf, my rules", vec![delta("Social", -1)?, delta("Tidy", 1)?]),
            ],
        )?,
        question(
            "guest-01",
            "Overnight guests...",
            "social",
            vec![
                AnswerOption::new("The more the merrier", vec![delta("Social", 2)?, delta("Chill", 1)?]),
                AnswerOption::new("Fine with a heads-up", vec![delta("Chill", 1)?]),
                AnswerOption::new("Rarely, please", vec![delta("Social", -2)?]),
            ],
        )?,
        question(
            "plan-01",
            "The chore rota is...",
            "lifestyle",
            vec![
                AnswerOption::new("A sacred document", vec![delta("Tidy", 2)?, delta("Chill", -1)?]),
                AnswerOption::new("A loose guideline", vec![delta("Chill", 1)?]),
                AnswerOption::new("News to me", vec![delta("Tidy", -2)?, delta("Chill", 2)?]),
            ],
        )?,
    ];

    let incomparables = vec![
        pair(
            "inc-01",
            "impossible",
            "A dragon the size of a hamster",
            "A hamster the size of a dragon",
        )?,
        pair(
            "inc-02",
            "impossible",
            "Always slightly too-warm showers",
            "Always slightly too-cold coffee",
        )?,
        pair(
            "inc-03",
            "impossible",
            "Wi-Fi that drops every full moon",
            "An elevator that only plays one song",
        )?,
    ];

    let buckets = BucketTable::new(vec![
        bucket(
            "The Zen Hermit",
            -60,
            -21,
            "Quiet, self-contained, and entirely at peace with a closed door.",
            "Can make a weekend disappear without leaving the room",
            "My plants are excellent conversationalists.",
        ),
        bucket(
            "The Cozy Anchor",
            -20,
            -7,
            "Keeps the flat calm and the kettle warm.",
            "Remembers everyone's tea order",
            "Home is where the blanket is.",
        ),
        bucket(
            "The Balanced Roomie",
            -6,
            6,
            "Equal parts plans and spontaneity; the household's thermostat.",
            "Defuses passive-aggressive sticky notes on sight",
            "We can do both?",
        ),
        bucket(
            "The Social Spark",
            7,
            20,
            "Turns a Tuesday dinner into a small event.",
            "Knows the neighbors by name and by playlist",
            "I invited a few people. Define few later.",
        ),
        bucket(
            "The Chaos Gremlin",
            21,
            60,
            "Maximum energy, minimum notice. Never a dull corridor.",
            "Can assemble furniture at 2am, loudly",
            "The smoke alarm is just applause.",
        ),
    ])?;

    QuestionCatalog::new(scored, incomparables, buckets)
}
