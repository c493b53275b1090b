//! In-memory store used by unit and router tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::error::StoreError;
use super::store::{MessageStore, RecordStore};
use crate::models::ai_message::{AiMessage, AiMessageType, GeneratedMessages, LatestMessages};
use crate::models::daily_record::{DailyRecord, DayStatus};
use crate::models::goals::Goals;
use crate::services::character::clamp_level;

#[derive(Default)]
struct Inner {
    records: HashMap<(Uuid, NaiveDate), DailyRecord>,
    goals: HashMap<Uuid, Goals>,
    messages: Vec<AiMessage>,
    fail_reads: bool,
    fail_message_inserts: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent record/goal operation fails.
    pub async fn fail_reads(&self) {
        self.inner.lock().await.fail_reads = true;
    }

    pub async fn fail_message_inserts(&self) {
        self.inner.lock().await.fail_message_inserts = true;
    }

    pub async fn record_count(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn message_count(&self) -> usize {
        self.inner.lock().await.messages.len()
    }

    pub async fn goals_for(&self, user_id: Uuid) -> Option<Goals> {
        self.inner.lock().await.goals.get(&user_id).cloned()
    }

    /// Seeds a stored message `age_mins` minutes in the past.
    pub async fn push_message(&self, message_type: AiMessageType, content: &str, age_mins: i64) {
        self.inner.lock().await.messages.push(AiMessage {
            id: Uuid::new_v4(),
            message_type,
            content: content.into(),
            created_at: Utc::now() - Duration::minutes(age_mins),
        });
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("memory store set to fail".into())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_record(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>, StoreError> {
        let inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        Ok(inner.records.get(&(user_id, date)).cloned())
    }

    async fn upsert_record(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        status: DayStatus,
    ) -> Result<DailyRecord, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        let now = Utc::now();
        let record = inner
            .records
            .entry((user_id, date))
            .and_modify(|r| {
                r.status = status;
                r.updated_at = now;
            })
            .or_insert_with(|| DailyRecord {
                id: Uuid::new_v4(),
                user_id,
                date,
                status,
                created_at: now,
                updated_at: now,
            });
        Ok(record.clone())
    }

    async fn list_records(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>, StoreError> {
        let inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        let mut records: Vec<DailyRecord> = inner
            .records
            .values()
            .filter(|r| r.user_id == user_id && r.date >= start && r.date <= end)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn get_or_create_goals(&self, user_id: Uuid) -> Result<Goals, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        let goals = inner
            .goals
            .entry(user_id)
            .or_insert_with(|| Goals::with_defaults(user_id));
        Ok(goals.clone())
    }

    async fn update_goals(
        &self,
        user_id: Uuid,
        weekly_goal: i32,
        monthly_goal: i32,
    ) -> Result<Goals, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        let goals = inner
            .goals
            .entry(user_id)
            .or_insert_with(|| Goals::with_defaults(user_id));
        goals.weekly_goal = weekly_goal;
        goals.monthly_goal = monthly_goal;
        goals.updated_at = Utc::now();
        Ok(goals.clone())
    }

    async fn update_character_level(&self, user_id: Uuid, level: i32) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        if let Some(goals) = inner.goals.get_mut(&user_id) {
            goals.character_level = clamp_level(level);
            goals.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn latest_goals_any_user(&self) -> Result<Option<Goals>, StoreError> {
        let inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        Ok(inner.goals.values().max_by_key(|g| g.created_at).cloned())
    }

    async fn list_records_any_user(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>, StoreError> {
        let inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        let mut records: Vec<DailyRecord> = inner
            .records
            .values()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.inner.lock().await.fail_reads {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn latest_messages(&self) -> Result<LatestMessages, StoreError> {
        let inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(unavailable());
        }
        let mut rows = inner.messages.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(LatestMessages::from_newest_first(rows))
    }

    async fn insert_messages(&self, messages: &GeneratedMessages) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_message_inserts {
            return Err(unavailable());
        }
        let now = Utc::now();
        for (message_type, content) in messages.entries() {
            inner.messages.push(AiMessage {
                id: Uuid::new_v4(),
                message_type,
                content: content.to_string(),
                created_at: now,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let day = date(2026, 10, 16);

        let first = store.upsert_record(user, day, DayStatus::Rest).await.unwrap();
        let second = store.upsert_record(user, day, DayStatus::Rest).await.unwrap();

        assert_eq!(store.record_count().await, 1);
        assert_eq!(first.id, second.id);
        assert_eq!(second.status, DayStatus::Rest);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_status() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let day = date(2026, 10, 16);

        store.upsert_record(user, day, DayStatus::Rest).await.unwrap();
        store.upsert_record(user, day, DayStatus::Drink).await.unwrap();

        let record = store.get_record(user, day).await.unwrap().unwrap();
        assert_eq!(record.status, DayStatus::Drink);
        assert_eq!(store.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_list_records_inclusive_and_ascending() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        for d in [14, 10, 12, 16] {
            store.upsert_record(user, date(2026, 10, d), DayStatus::Rest).await.unwrap();
        }
        store.upsert_record(other, date(2026, 10, 12), DayStatus::Rest).await.unwrap();

        let records = store
            .list_records(user, date(2026, 10, 12), date(2026, 10, 16))
            .await
            .unwrap();
        let days: Vec<u32> = records.iter().map(|r| chrono::Datelike::day(&r.date)).collect();
        assert_eq!(days, vec![12, 14, 16]);
    }

    #[tokio::test]
    async fn test_goals_created_once_with_defaults() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        let first = store.get_or_create_goals(user).await.unwrap();
        let second = store.get_or_create_goals(user).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!((first.weekly_goal, first.monthly_goal, first.character_level), (2, 8, 1));
    }

    #[tokio::test]
    async fn test_character_level_clamped_on_write() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.get_or_create_goals(user).await.unwrap();

        store.update_character_level(user, 42).await.unwrap();
        assert_eq!(store.goals_for(user).await.unwrap().character_level, 10);

        store.update_character_level(user, -3).await.unwrap();
        assert_eq!(store.goals_for(user).await.unwrap().character_level, 1);
    }
}
