//! PostgreSQL implementation of EngagementRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::engagement::EngagementState;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::EngagementRepository;

/// PostgreSQL implementation of EngagementRepository.
///
/// One row per user in `engagement_states`. A missing row is a fresh
/// state, never an error.
#[derive(Clone)]
pub struct PostgresEngagementRepository {
    pool: PgPool,
}

impl PostgresEngagementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementRepository for PostgresEngagementRepository {
    async fn fetch(&self, user_id: &UserId) -> Result<EngagementState, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT reward_balance, streak_count, last_answered_at
            FROM engagement_states WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to fetch engagement: {}", e)))?;

        Ok(match row {
            Some(row) => {
                let reward_balance: i32 = row.get("reward_balance");
                let streak_count: i32 = row.get("streak_count");
                let last_answered_at: Option<chrono::DateTime<chrono::Utc>> =
                    row.get("last_answered_at");
                EngagementState::reconstitute(
                    reward_balance.max(0) as u32,
                    streak_count.max(0) as u32,
                    last_answered_at.map(Timestamp::from_datetime),
                )
            }
            None => EngagementState::new(),
        })
    }

    async fn upsert(&self, user_id: &UserId, state: &EngagementState) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO engagement_states (
                user_id, reward_balance, streak_count, last_answered_at
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                reward_balance = EXCLUDED.reward_balance,
                streak_count = EXCLUDED.streak_count,
                last_answered_at = EXCLUDED.last_answered_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(state.reward_balance as i32)
        .bind(state.streak_count as i32)
        .bind(
            state
                .last_answered_at
                .as_ref()
                .map(|ts| *ts.as_datetime()),
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to upsert engagement: {}", e)))?;

        Ok(())
    }
}
