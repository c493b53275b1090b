use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_WEEKLY_GOAL: i32 = 2;
pub const DEFAULT_MONTHLY_GOAL: i32 = 8;
pub const MIN_CHARACTER_LEVEL: i32 = 1;
pub const MAX_CHARACTER_LEVEL: i32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Goals {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weekly_goal: i32,
    pub monthly_goal: i32,
    /// Derived from this month's rest days; never written by the user.
    pub character_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goals {
    /// Row inserted the first time a user's goals are read.
    pub fn with_defaults(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            monthly_goal: DEFAULT_MONTHLY_GOAL,
            character_level: MIN_CHARACTER_LEVEL,
            created_at: now,
            updated_at: now,
        }
    }
}
