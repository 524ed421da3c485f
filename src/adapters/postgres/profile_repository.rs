//! PostgreSQL implementation of ProfileRepository.
//!
//! One row per (user, dimension) in `dimension_scores`. A batch of deltas
//! is applied inside a single transaction so a failed write never leaves a
//! half-applied answer.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::DimensionProfile;
use crate::domain::question::DimensionDelta;
use crate::ports::ProfileRepository;

/// PostgreSQL implementation of ProfileRepository.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn apply_deltas(
        &self,
        user_id: &UserId,
        deltas: &[DimensionDelta],
    ) -> Result<(), DomainError> {
        if deltas.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::persistence(format!("Failed to begin transaction: {}", e))
        })?;

        for delta in deltas {
            sqlx::query(
                r#"
                INSERT INTO dimension_scores (user_id, dimension, score)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, dimension)
                DO UPDATE SET score = dimension_scores.score + EXCLUDED.score
                "#,
            )
            .bind(user_id.as_str())
            .bind(&delta.dimension)
            .bind(delta.value)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::persistence(format!("Failed to apply score delta: {}", e))
            })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::persistence(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    async fn fetch(&self, user_id: &UserId) -> Result<DimensionProfile, DomainError> {
        let rows = sqlx::query(
            "SELECT dimension, score FROM dimension_scores WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to fetch profile: {}", e)))?;

        Ok(DimensionProfile::from_rows(rows.iter().map(|row| {
            let dimension: String = row.get("dimension");
            let score: i32 = row.get("score");
            (dimension, score)
        })))
    }

    async fn reset(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM dimension_scores WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Failed to reset profile: {}", e)))?;
        Ok(())
    }
}
