use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DailyRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "record_date")]
    pub date: NaiveDate,
    pub status: DayStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed set of per-day outcomes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "day_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// Alcohol-free day.
    Rest,
    Drink,
    #[default]
    Unset,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Drink => "drink",
            Self::Unset => "unset",
        }
    }

    /// Label shown on the record buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rest => "休肝日",
            Self::Drink => "飲酒",
            Self::Unset => "未入力",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpsertDailyRecordRequest {
    pub date: Option<NaiveDate>,
    pub status: DayStatus,
}

/// Raw query strings; parsed leniently with `parse_local_date_string`.
#[derive(Debug, Deserialize)]
pub struct DailyRecordQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// One cell of the last-seven-days strip.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub label: String,
    pub day_of_week: &'static str,
    pub status: DayStatus,
    pub status_label: &'static str,
}
