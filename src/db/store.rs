//! Storage contract for day records, goals and generated messages.
//!
//! Every per-user operation is scoped by the authenticated user's id. The
//! Postgres implementation lives in `postgres.rs`; tests run against the
//! in-memory implementation in `memory.rs`.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::error::StoreError;
use crate::models::ai_message::{GeneratedMessages, LatestMessages};
use crate::models::daily_record::{DailyRecord, DayStatus};
use crate::models::goals::Goals;

/// Day records and the per-user goals row.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Record for one calendar day, if any.
    async fn get_record(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>, StoreError>;

    /// Insert or overwrite the record keyed on (user, date). Repeating the
    /// same call only refreshes `updated_at`.
    async fn upsert_record(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        status: DayStatus,
    ) -> Result<DailyRecord, StoreError>;

    /// Records with `start <= date <= end`, ordered by date ascending.
    async fn list_records(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>, StoreError>;

    /// The user's goals row, inserted with defaults (2 / 8 / level 1) when
    /// absent.
    async fn get_or_create_goals(&self, user_id: Uuid) -> Result<Goals, StoreError>;

    async fn update_goals(
        &self,
        user_id: Uuid,
        weekly_goal: i32,
        monthly_goal: i32,
    ) -> Result<Goals, StoreError>;

    /// Persist the character level, clamped to 1..=10 before the write.
    async fn update_character_level(&self, user_id: Uuid, level: i32) -> Result<(), StoreError>;

    /// Most recently created goals row of any user.
    async fn latest_goals_any_user(&self) -> Result<Option<Goals>, StoreError>;

    /// Records of every user with `start <= date <= end`.
    async fn list_records_any_user(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Append-only store of generated messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn latest_messages(&self) -> Result<LatestMessages, StoreError>;

    /// Inserts all three messages or none of them.
    async fn insert_messages(&self, messages: &GeneratedMessages) -> Result<(), StoreError>;
}

/// Both halves of the store behind one trait object.
pub trait Store: RecordStore + MessageStore {}

impl<T: RecordStore + MessageStore> Store for T {}
