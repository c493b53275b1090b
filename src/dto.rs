//! # Kyukanbi: Request/Response DTOs
//!
//! Aggregate API contract types. Plain row types live in `models`.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` / summaries → serialized to client JSON
//! - Request validation is expressed via `validator` derive macros

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ai_message::GeneratedMessages;
use crate::models::daily_record::{DailyRecord, DayEntry, DayStatus};
use crate::models::goals::Goals;
use crate::models::progress::Progress;
use crate::services::dates::DateRange;
use crate::services::messages::DisplayMessages;

// ============================================================================
// Goals
// ============================================================================

/// PUT /api/goals
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGoalsRequest {
    #[validate(range(min = 0, max = 7, message = "weekly_goal must be between 0 and 7"))]
    pub weekly_goal: i32,

    #[validate(range(min = 0, max = 31, message = "monthly_goal must be between 0 and 31"))]
    pub monthly_goal: i32,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CharacterInfo {
    pub level: i32,
    pub name: &'static str,
}

/// GET /api/dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub today_status: DayStatus,
    pub goals: Goals,
    pub week: PeriodProgress,
    pub month: PeriodProgress,
    pub character: CharacterInfo,
    pub last_7_days: Vec<DayEntry>,
    pub messages: DisplayMessages,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodProgress {
    #[serde(flatten)]
    pub range: DateRange,
    #[serde(flatten)]
    pub progress: Progress,
}

// ============================================================================
// Calendar
// ============================================================================

/// GET /api/records/month/:year/:month
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub records: Vec<DailyRecord>,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub status: Option<DayStatus>,
    pub in_month: bool,
    pub is_today: bool,
}

// ============================================================================
// Messages
// ============================================================================

/// POST /api/messages/generate
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    pub ok: bool,
    pub message: String,
    pub week: DateRange,
    pub rest_days: i64,
    pub weekly_target: i32,
    pub data: GeneratedMessages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goals_request_in_range() {
        let req = UpdateGoalsRequest {
            weekly_goal: 7,
            monthly_goal: 0,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_goals_request_out_of_range() {
        let weekly = UpdateGoalsRequest {
            weekly_goal: 8,
            monthly_goal: 8,
        };
        assert!(weekly.validate().is_err());

        let monthly = UpdateGoalsRequest {
            weekly_goal: 2,
            monthly_goal: 32,
        };
        assert!(monthly.validate().is_err());

        let negative = UpdateGoalsRequest {
            weekly_goal: -1,
            monthly_goal: 8,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_period_progress_flattens() {
        let period = PeriodProgress {
            range: DateRange {
                start: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            },
            progress: Progress {
                current: 1,
                target: 2,
                percentage: 50.0,
            },
        };
        let json = serde_json::to_value(&period).unwrap();
        assert_eq!(json["start"], "2026-10-12");
        assert_eq!(json["end"], "2026-10-18");
        assert_eq!(json["current"], 1);
        assert_eq!(json["percentage"], 50.0);
    }
}
