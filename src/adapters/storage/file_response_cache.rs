//! File-based response cache.
//!
//! One JSON file per user under a base directory, holding the latest
//! answer value per question. The cache is a UX accelerator only - a
//! missing or corrupt file reads as empty rather than failing the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, Timestamp, UserId};
use crate::ports::{CachedResponse, ResponseCache};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    responses: BTreeMap<String, CachedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedEntry {
    answer_value: String,
    cached_at: Timestamp,
}

/// File-based implementation of ResponseCache.
#[derive(Debug, Clone)]
pub struct FileResponseCache {
    base_path: PathBuf,
}

impl FileResponseCache {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn user_file_path(&self, user_id: &UserId) -> PathBuf {
        self.base_path.join(format!("{}.json", user_id.as_str()))
    }

    async fn read_file(&self, user_id: &UserId) -> CacheFile {
        let path = self.user_file_path(user_id);
        match fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(file) => file,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "discarding unreadable response cache file"
                    );
                    CacheFile::default()
                }
            },
            Err(_) => CacheFile::default(),
        }
    }

    fn io_error(err: std::io::Error) -> DomainError {
        DomainError::new(ErrorCode::CacheError, format!("Cache write failed: {}", err))
    }
}

#[async_trait]
impl ResponseCache for FileResponseCache {
    async fn put(
        &self,
        user_id: &UserId,
        question_id: &QuestionId,
        answer_value: &str,
        cached_at: Timestamp,
    ) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(Self::io_error)?;

        let mut file = self.read_file(user_id).await;
        file.responses.insert(
            question_id.as_str().to_string(),
            CachedEntry {
                answer_value: answer_value.to_string(),
                cached_at,
            },
        );

        let json = serde_json::to_string_pretty(&file).map_err(|e| {
            DomainError::new(
                ErrorCode::CacheError,
                format!("Cache serialization failed: {}", e),
            )
        })?;

        fs::write(self.user_file_path(user_id), json)
            .await
            .map_err(Self::io_error)?;
        Ok(())
    }

    async fn get_all(&self, user_id: &UserId) -> Result<Vec<CachedResponse>, DomainError> {
        let file = self.read_file(user_id).await;
        file.responses
            .into_iter()
            .map(|(question_id, entry)| {
                let question_id = QuestionId::new(question_id).map_err(|e| {
                    DomainError::new(
                        ErrorCode::CacheError,
                        format!("Corrupt cache entry: {}", e),
                    )
                })?;
                Ok(CachedResponse {
                    question_id,
                    answer_value: entry.answer_value,
                    cached_at: entry.cached_at,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[tokio::test]
    async fn put_then_get_roundtrips() {
        let dir = TempDir::new().unwrap();
        let cache = FileResponseCache::new(dir.path());

        cache
            .put(&user(), &qid("q0"), "Yes", Timestamp::now())
            .await
            .unwrap();

        let all = cache.get_all(&user()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].question_id, qid("q0"));
        assert_eq!(all[0].answer_value, "Yes");
    }

    #[tokio::test]
    async fn put_overwrites_same_question() {
        let dir = TempDir::new().unwrap();
        let cache = FileResponseCache::new(dir.path());

        cache
            .put(&user(), &qid("q0"), "first", Timestamp::now())
            .await
            .unwrap();
        cache
            .put(&user(), &qid("q0"), "second", Timestamp::now())
            .await
            .unwrap();

        let all = cache.get_all(&user()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].answer_value, "second");
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let cache = FileResponseCache::new(dir.path());
        assert!(cache.get_all(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("user-1.json"), "not json").unwrap();

        let cache = FileResponseCache::new(dir.path());
        assert!(cache.get_all(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let dir = TempDir::new().unwrap();
        let cache = FileResponseCache::new(dir.path());
        cache
            .put(&user(), &qid("q0"), "Yes", Timestamp::now())
            .await
            .unwrap();

        let other = UserId::new("user-2").unwrap();
        assert!(cache.get_all(&other).await.unwrap().is_empty());
    }
}
