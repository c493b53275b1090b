use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::error::StoreError;
use super::store::{MessageStore, RecordStore};
use crate::models::ai_message::{AiMessage, GeneratedMessages, LatestMessages};
use crate::models::daily_record::{DailyRecord, DayStatus};
use crate::models::goals::{Goals, MIN_CHARACTER_LEVEL};
use crate::services::character::clamp_level;

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn get_record(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>, StoreError> {
        let record = sqlx::query_as::<_, DailyRecord>(
            "SELECT * FROM daily_records WHERE user_id = $1 AND record_date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    async fn upsert_record(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        status: DayStatus,
    ) -> Result<DailyRecord, StoreError> {
        let record = sqlx::query_as::<_, DailyRecord>(
            r#"
            INSERT INTO daily_records (id, user_id, record_date, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, record_date) DO UPDATE SET
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(status)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    async fn list_records(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>, StoreError> {
        let records = sqlx::query_as::<_, DailyRecord>(
            r#"
            SELECT * FROM daily_records
            WHERE user_id = $1 AND record_date BETWEEN $2 AND $3
            ORDER BY record_date ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    async fn get_or_create_goals(&self, user_id: Uuid) -> Result<Goals, StoreError> {
        let defaults = Goals::with_defaults(user_id);

        // No-op update on conflict so RETURNING yields the existing row
        let goals = sqlx::query_as::<_, Goals>(
            r#"
            INSERT INTO goals (id, user_id, weekly_goal, monthly_goal, character_level)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
                SET user_id = goals.user_id
            RETURNING *
            "#,
        )
        .bind(defaults.id)
        .bind(defaults.user_id)
        .bind(defaults.weekly_goal)
        .bind(defaults.monthly_goal)
        .bind(defaults.character_level)
        .fetch_one(&self.db)
        .await?;

        Ok(goals)
    }

    async fn update_goals(
        &self,
        user_id: Uuid,
        weekly_goal: i32,
        monthly_goal: i32,
    ) -> Result<Goals, StoreError> {
        let goals = sqlx::query_as::<_, Goals>(
            r#"
            INSERT INTO goals (id, user_id, weekly_goal, monthly_goal, character_level)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                weekly_goal = EXCLUDED.weekly_goal,
                monthly_goal = EXCLUDED.monthly_goal,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(weekly_goal)
        .bind(monthly_goal)
        .bind(MIN_CHARACTER_LEVEL)
        .fetch_one(&self.db)
        .await?;

        Ok(goals)
    }

    async fn update_character_level(&self, user_id: Uuid, level: i32) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE goals SET character_level = $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(clamp_level(level))
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn latest_goals_any_user(&self) -> Result<Option<Goals>, StoreError> {
        let goals = sqlx::query_as::<_, Goals>(
            "SELECT * FROM goals ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(goals)
    }

    async fn list_records_any_user(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>, StoreError> {
        let records = sqlx::query_as::<_, DailyRecord>(
            r#"
            SELECT * FROM daily_records
            WHERE record_date BETWEEN $1 AND $2
            ORDER BY record_date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn latest_messages(&self) -> Result<LatestMessages, StoreError> {
        let rows = sqlx::query_as::<_, AiMessage>(
            r#"
            SELECT DISTINCT ON (message_type) *
            FROM ai_messages
            ORDER BY message_type, created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(LatestMessages::from_newest_first(rows))
    }

    async fn insert_messages(&self, messages: &GeneratedMessages) -> Result<(), StoreError> {
        let [(t1, c1), (t2, c2), (t3, c3)] = messages.entries();

        // Single statement so a failure leaves no partial batch behind
        sqlx::query(
            r#"
            INSERT INTO ai_messages (id, message_type, content)
            VALUES ($1, $2, $3), ($4, $5, $6), ($7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(t1)
        .bind(c1)
        .bind(Uuid::new_v4())
        .bind(t2)
        .bind(c2)
        .bind(Uuid::new_v4())
        .bind(t3)
        .bind(c3)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
