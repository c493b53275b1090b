//! Text shown on the home screen: a deterministic daily tip plus weekly
//! summary and encouragement templates. Stored model-generated text of the
//! same type always replaces the local template.

use chrono::NaiveDate;
use serde::Serialize;

use super::dates::to_local_date_string;
use crate::models::ai_message::{AiMessageType, LatestMessages};
use crate::models::progress::Progress;

pub const DAILY_TIPS: [&str; 10] = [
    "寝る前にコップ1杯の水を飲むと、翌朝すっきりだよ。",
    "炭酸水にレモンを搾ると、乾杯気分はそのままでいけるよ。",
    "休肝日の夜は、いつもより10分早くお布団に入ってみよ。",
    "晩ごはんをゆっくり食べると、飲みたい気持ちも落ち着くよ。",
    "軽いストレッチで1日の疲れをリセットしよう。",
    "お気に入りのお茶を見つけると、休肝日がちょっと楽しみになるよ。",
    "がんばった自分に、甘いものでごほうびもアリ。",
    "湯船にゆっくり浸かると、ぐっすり眠れるよ。",
    "週のはじめに休肝日を決めておくと、ペースがつかみやすいよ。",
    "1日できたら、それだけでえらい。完璧じゃなくて大丈夫。",
];

const ALMOST_THERE_RATIO: f64 = 0.8;

/// Where a displayed message came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    Ai,
    Local,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayMessage {
    pub text: String,
    pub source: MessageSource,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayMessages {
    pub weekly_summary: DisplayMessage,
    pub encouragement: DisplayMessage,
    pub daily_tip: DisplayMessage,
}

/// Tip for a `YYYY-MM-DD` string: sum of UTF-16 code units modulo the pool
/// size. Pure; the same string always picks the same tip.
pub fn daily_tip(date: &str) -> &'static str {
    let sum: u64 = date.encode_utf16().map(u64::from).sum();
    DAILY_TIPS[(sum % DAILY_TIPS.len() as u64) as usize]
}

enum Band {
    NoTarget,
    NotStarted,
    Met,
    AlmostThere,
    InProgress,
}

fn band(progress: &Progress) -> Band {
    if progress.target <= 0 {
        return Band::NoTarget;
    }
    if progress.current == 0 {
        return Band::NotStarted;
    }
    if progress.is_met() {
        return Band::Met;
    }
    if progress.current as f64 / progress.target as f64 >= ALMOST_THERE_RATIO {
        return Band::AlmostThere;
    }
    Band::InProgress
}

pub fn weekly_summary(progress: &Progress) -> String {
    let (current, target, remaining) = (progress.current, progress.target, progress.remaining());
    match band(progress) {
        Band::NoTarget => "今週の目標はまだ決まってないよ。設定から決めてみよ！".into(),
        Band::NotStarted => format!("今週は0/{target}日。ここからスタートしよ！"),
        Band::Met => format!("今週{current}/{target}日で目標達成！おめでとう🎉"),
        Band::AlmostThere => format!("今週{current}/{target}日！あと{remaining}日で達成だよ"),
        Band::InProgress => format!("今週{current}/{target}日達成中！あと{remaining}日"),
    }
}

pub fn encouragement(progress: &Progress) -> String {
    let remaining = progress.remaining();
    match band(progress) {
        Band::NoTarget => "自分のペースでいこ。記録するだけでも十分えらいよ。".into(),
        Band::NotStarted => "まだ0日でも大丈夫。始めようと思えた時点で勝ちだよ！".into(),
        Band::Met => "目標クリア、マジえぐい！この調子でいこ✨".into(),
        Band::AlmostThere => format!("あと{remaining}日でゴール！もうすぐだよ、いける！"),
        Band::InProgress => format!("ちゃんと休めてるのえらい！あと{remaining}日、ゆるっといこ"),
    }
}

/// Picks stored text where it exists and falls back to the local template
/// otherwise, per message type.
pub fn resolve_messages(
    latest: &LatestMessages,
    week_progress: &Progress,
    today: NaiveDate,
) -> DisplayMessages {
    let pick = |message_type: AiMessageType, local: String| match latest.get(message_type) {
        Some(text) => DisplayMessage {
            text: text.to_string(),
            source: MessageSource::Ai,
        },
        None => DisplayMessage {
            text: local,
            source: MessageSource::Local,
        },
    };

    DisplayMessages {
        weekly_summary: pick(AiMessageType::WeeklySummary, weekly_summary(week_progress)),
        encouragement: pick(AiMessageType::Encouragement, encouragement(week_progress)),
        daily_tip: pick(
            AiMessageType::DailyTip,
            daily_tip(&to_local_date_string(today)).to_string(),
        ),
    }
}
