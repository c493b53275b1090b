use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use super::character::{calculate_character_level, level_name};
use super::dates::{
    day_of_week, format_date, last_7_days, last_7_days_range, month_date_range, week_date_range,
};
use super::messages::resolve_messages;
use super::progress::calculate_progress;
use crate::db::{MessageStore, RecordStore, Store, StoreError};
use crate::dto::{CharacterInfo, DashboardSummary, PeriodProgress};
use crate::models::daily_record::{DayEntry, DayStatus};

/// Loads everything the home screen shows. Recomputes the character level
/// from this month's rest days and writes it back as part of the load.
pub async fn load_dashboard<S>(
    store: &S,
    user_id: Uuid,
    today: NaiveDate,
) -> Result<DashboardSummary, StoreError>
where
    S: Store + ?Sized,
{
    let today_status = store
        .get_record(user_id, today)
        .await?
        .map(|r| r.status)
        .unwrap_or_default();

    let mut goals = store.get_or_create_goals(user_id).await?;

    let week_range = week_date_range(today);
    let week_records = store
        .list_records(user_id, week_range.start, week_range.end)
        .await?;
    let week_progress = calculate_progress(&week_records, goals.weekly_goal);

    let month_range = month_date_range(today);
    let month_records = store
        .list_records(user_id, month_range.start, month_range.end)
        .await?;
    let month_progress = calculate_progress(&month_records, goals.monthly_goal);

    let level = calculate_character_level(month_progress.current);
    store.update_character_level(user_id, level).await?;
    goals.character_level = level;
    tracing::debug!(
        user_id = %user_id,
        rest_days = month_progress.current,
        character_level = level,
        "Character level persisted"
    );

    let strip_range = last_7_days_range(today);
    let strip_records = store
        .list_records(user_id, strip_range.start, strip_range.end)
        .await?;
    let by_date: HashMap<NaiveDate, DayStatus> =
        strip_records.iter().map(|r| (r.date, r.status)).collect();
    let last_7_days = last_7_days(today)
        .into_iter()
        .map(|date| {
            let status = by_date.get(&date).copied().unwrap_or_default();
            DayEntry {
                date,
                label: format_date(date),
                day_of_week: day_of_week(date),
                status,
                status_label: status.label(),
            }
        })
        .collect();

    let latest = store.latest_messages().await?;
    let messages = resolve_messages(&latest, &week_progress, today);

    Ok(DashboardSummary {
        today,
        today_status,
        goals,
        week: PeriodProgress {
            range: week_range,
            progress: week_progress,
        },
        month: PeriodProgress {
            range: month_range,
            progress: month_progress,
        },
        character: CharacterInfo {
            level,
            name: level_name(level),
        },
        last_7_days,
        messages,
    })
}
