use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use super::dates::{calendar_grid, month_range};
use crate::db::RecordStore;
use crate::dto::{CalendarDay, CalendarMonth};
use crate::error::{AppError, AppResult};
use crate::models::daily_record::DayStatus;

/// Records and grid cells for one month of the calendar screen.
pub async fn load_month<S>(
    store: &S,
    user_id: Uuid,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> AppResult<CalendarMonth>
where
    S: RecordStore + ?Sized,
{
    let invalid = || AppError::Validation(format!("{year}-{month:02} is not a valid calendar month"));
    let range = month_range(year, month).ok_or_else(invalid)?;
    let cells = calendar_grid(year, month).ok_or_else(invalid)?;

    let records = store.list_records(user_id, range.start, range.end).await?;
    let by_date: HashMap<NaiveDate, DayStatus> =
        records.iter().map(|r| (r.date, r.status)).collect();

    let days = cells
        .into_iter()
        .map(|(date, in_month)| CalendarDay {
            date,
            day: date.day(),
            status: if in_month { by_date.get(&date).copied() } else { None },
            in_month,
            is_today: in_month && date == today,
        })
        .collect();

    Ok(CalendarMonth {
        year,
        month,
        records,
        days,
    })
}
