use crate::models::daily_record::{DailyRecord, DayStatus};
use crate::models::progress::Progress;

/// Counts rest days in `records` against `target`. The caller picks the
/// window; the percentage is capped at 100 and is 0 for a non-positive target.
pub fn calculate_progress(records: &[DailyRecord], target: i32) -> Progress {
    let current = count_rest_days(records);
    let percentage = if target > 0 {
        (current as f64 / target as f64 * 100.0).min(100.0)
    } else {
        0.0
    };

    Progress {
        current,
        target,
        percentage,
    }
}

pub fn count_rest_days(records: &[DailyRecord]) -> i64 {
    records
        .iter()
        .filter(|r| r.status == DayStatus::Rest)
        .count() as i64
}
