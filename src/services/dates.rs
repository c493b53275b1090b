//! Calendar-date helpers.
//!
//! Everything here works on `NaiveDate` values that were already resolved in
//! the configured local offset (see `Config::local_today`), so no function can
//! shift a day by converting through UTC. `today` is always passed in.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

const DAY_NAMES: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Inclusive date window.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// `YYYY-MM-DD`, zero padded.
pub fn to_local_date_string(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Inverse of [`to_local_date_string`]. A missing or unparsable month or day
/// falls back to 1; an unparsable year or an impossible date gives `None`.
pub fn parse_local_date_string(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().splitn(3, '-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month = parse_field_or_one(parts.next());
    let day = parse_field_or_one(parts.next());
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_field_or_one(part: Option<&str>) -> u32 {
    part.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|v| *v != 0)
        .unwrap_or(1)
}

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn find_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday..=Sunday week containing `today`.
pub fn week_date_range(today: NaiveDate) -> DateRange {
    let start = find_monday(today);
    DateRange {
        start,
        end: start + Duration::days(6),
    }
}

/// First..=last day of the month containing `today`.
pub fn month_date_range(today: NaiveDate) -> DateRange {
    // today is a valid date, so its own month always resolves
    month_range(today.year(), today.month()).unwrap_or(DateRange {
        start: today,
        end: today,
    })
}

/// First..=last day of an arbitrary month; `None` when `month` is not 1..=12.
pub fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(DateRange {
        start,
        end: next - Duration::days(1),
    })
}

/// Seven consecutive dates ending with `today`, oldest first.
pub fn last_7_days(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

pub fn last_7_days_range(today: NaiveDate) -> DateRange {
    DateRange {
        start: today - Duration::days(6),
        end: today,
    }
}

/// `M/D` without padding.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Single-character day name, Sunday = 日.
pub fn day_of_week(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// Cells of a Sunday-first month grid: trailing days of the previous month
/// pad the first row, followed by every day of the month. `None` when the
/// month or its padding falls outside the representable date range.
pub fn calendar_grid(year: i32, month: u32) -> Option<Vec<(NaiveDate, bool)>> {
    let range = month_range(year, month)?;
    let padding = range.start.weekday().num_days_from_sunday() as i64;

    let mut cells = Vec::with_capacity(padding as usize + 31);
    for offset in (1..=padding).rev() {
        cells.push((range.start.checked_sub_signed(Duration::days(offset))?, false));
    }
    let mut day = range.start;
    while day <= range.end {
        cells.push((day, true));
        day += Duration::days(1);
    }
    Some(cells)
}

/// Month before `(year, month)`, or `None` when the year underflows.
pub fn previous_month(year: i32, month: u32) -> Option<(i32, u32)> {
    if month <= 1 {
        Some((year.checked_sub(1)?, 12))
    } else {
        Some((year, month - 1))
    }
}

/// Month after `(year, month)`, or `None` when the year overflows.
pub fn next_month(year: i32, month: u32) -> Option<(i32, u32)> {
    if month >= 12 {
        Some((year.checked_add(1)?, 1))
    } else {
        Some((year, month + 1))
    }
}
