//! YAML-backed question source.
//!
//! Reads the authored question bank from a YAML file and validates it into
//! a `QuestionCatalog`. A malformed individual question is skipped with a
//! warning so one bad entry cannot take the whole game down; an invalid
//! bucket table is a load error, since every result lookup depends on it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};
use crate::domain::question::{
    AnswerOption, BucketTable, DimensionDelta, IncomparablePair, PersonalityBucket,
    QuestionCatalog, ScoredQuestion,
};
use crate::ports::QuestionSource;

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    scored_questions: Vec<RawScoredQuestion>,
    #[serde(default)]
    incomparable_pairs: Vec<RawIncomparablePair>,
    buckets: Vec<PersonalityBucket>,
}

#[derive(Debug, Deserialize)]
struct RawScoredQuestion {
    id: String,
    text: String,
    category: String,
    options: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    text: String,
    #[serde(default)]
    deltas: Vec<RawDelta>,
}

#[derive(Debug, Deserialize)]
struct RawDelta {
    dimension: String,
    value: i32,
}

#[derive(Debug, Deserialize)]
struct RawIncomparablePair {
    id: String,
    category: String,
    item_a: String,
    item_b: String,
}

/// Question source loading the catalog from a YAML file on each call.
#[derive(Debug, Clone)]
pub struct YamlQuestionSource {
    path: PathBuf,
}

impl YamlQuestionSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

fn build_scored(raw: RawScoredQuestion) -> Result<ScoredQuestion, DomainError> {
    let id = QuestionId::new(raw.id)?;
    let options = raw
        .options
        .into_iter()
        .map(|option| {
            let deltas = option
                .deltas
                .into_iter()
                .map(|delta| DimensionDelta::new(delta.dimension, delta.value))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AnswerOption::new(option.text, deltas))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;
    ScoredQuestion::new(id, raw.text, raw.category, options)
}

fn build_pair(raw: RawIncomparablePair) -> Result<IncomparablePair, DomainError> {
    let id = QuestionId::new(raw.id)?;
    IncomparablePair::new(id, raw.category, raw.item_a, raw.item_b)
}

fn build_catalog(raw: RawCatalog) -> Result<QuestionCatalog, DomainError> {
    let mut scored = Vec::with_capacity(raw.scored_questions.len());
    for question in raw.scored_questions {
        match build_scored(question) {
            Ok(question) => scored.push(question),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed scored question");
            }
        }
    }

    let mut pairs = Vec::with_capacity(raw.incomparable_pairs.len());
    for pair in raw.incomparable_pairs {
        match build_pair(pair) {
            Ok(pair) => pairs.push(pair),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed incomparable pair");
            }
        }
    }

    let buckets = BucketTable::new(raw.buckets)?;
    QuestionCatalog::new(scored, pairs, buckets)
}

#[async_trait]
impl QuestionSource for YamlQuestionSource {
    async fn load(&self) -> Result<QuestionCatalog, DomainError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to read question bank '{}': {}", self.path.display(), e),
            )
        })?;

        let raw: RawCatalog = serde_yaml::from_str(&content).map_err(|e| {
            DomainError::new(
                ErrorCode::MalformedQuestion,
                format!("Failed to parse question bank: {}", e),
            )
        })?;

        build_catalog(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID_BANK: &str = r#"
scored_questions:
  - id: tidy-01
    text: "Dishes in the sink overnight?"
    category: lifestyle
    options:
      - text: "Never"
        deltas:
          - dimension: Tidy
            value: 2
      - text: "Sometimes"
incomparable_pairs:
  - id: inc-01
    category: random
    item_a: "A tiny dragon"
    item_b: "A talking cactus"
buckets:
  - name: "The Balanced Roomie"
    min_score: -100
    max_score: 100
    description: "d"
    special_power: "p"
    quote: "q"
"#;

    async fn load(yaml: &str) -> Result<QuestionCatalog, DomainError> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.yaml");
        std::fs::write(&path, yaml).unwrap();
        YamlQuestionSource::new(&path).load().await
    }

    #[tokio::test]
    async fn loads_valid_bank() {
        let catalog = load(VALID_BANK).await.unwrap();
        assert_eq!(catalog.scored_questions().len(), 1);
        assert_eq!(catalog.incomparable_pairs().len(), 1);
        let question = &catalog.scored_questions()[0];
        assert_eq!(question.options().len(), 2);
        assert!(question.options()[1].deltas.is_empty());
    }

    #[tokio::test]
    async fn malformed_question_is_skipped_not_fatal() {
        let yaml = r#"
scored_questions:
  - id: bad-01
    text: "No options"
    category: lifestyle
    options: []
  - id: good-01
    text: "Fine"
    category: lifestyle
    options:
      - text: "Yes"
buckets:
  - name: "Only"
    min_score: -100
    max_score: 100
    description: "d"
    special_power: "p"
    quote: "q"
"#;
        let catalog = load(yaml).await.unwrap();
        assert_eq!(catalog.scored_questions().len(), 1);
        assert_eq!(catalog.scored_questions()[0].id().as_str(), "good-01");
    }

    #[tokio::test]
    async fn bucket_gap_is_a_load_error() {
        let yaml = r#"
scored_questions: []
buckets:
  - name: "Low"
    min_score: -100
    max_score: 0
    description: "d"
    special_power: "p"
    quote: "q"
  - name: "High"
    min_score: 5
    max_score: 100
    description: "d"
    special_power: "p"
    quote: "q"
"#;
        let result = load(yaml).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let source = YamlQuestionSource::new("/nonexistent/bank.yaml");
        assert!(source.load().await.is_err());
    }
}
