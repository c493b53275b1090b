use crate::models::goals::{MAX_CHARACTER_LEVEL, MIN_CHARACTER_LEVEL};

const LEVEL_NAMES: [&str; 10] = [
    "ほろ酔い",
    "ひと休み",
    "お茶派",
    "ゆる休肝",
    "すっきり",
    "ぐっすり",
    "きらきら",
    "肝臓の友",
    "休肝マスター",
    "伝説の休肝王",
];

/// Level from the month-to-date rest-day count: one level per rest day,
/// starting at 1 and saturating at 10. The count only ever grows within a
/// month, so the level never drops until the month rolls over.
pub fn calculate_character_level(rest_days_this_month: i64) -> i32 {
    let level = rest_days_this_month.max(0).saturating_add(1);
    level.min(MAX_CHARACTER_LEVEL as i64) as i32
}

pub fn clamp_level(level: i32) -> i32 {
    level.clamp(MIN_CHARACTER_LEVEL, MAX_CHARACTER_LEVEL)
}

/// Display name for a level; out-of-range levels are clamped first.
pub fn level_name(level: i32) -> &'static str {
    LEVEL_NAMES[(clamp_level(level) - 1) as usize]
}
