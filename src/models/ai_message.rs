use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiMessage {
    pub id: Uuid,
    pub message_type: AiMessageType,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "ai_message_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AiMessageType {
    WeeklySummary,
    Encouragement,
    DailyTip,
}

/// Most recent stored text per message type. A type with no stored
/// message stays `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LatestMessages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encouragement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_tip: Option<String>,
}

impl LatestMessages {
    /// Builds from rows ordered newest first; the first row seen per type wins.
    pub fn from_newest_first(messages: impl IntoIterator<Item = AiMessage>) -> Self {
        let mut latest = Self::default();
        for message in messages {
            let slot = latest.slot_mut(message.message_type);
            if slot.is_none() {
                *slot = Some(message.content);
            }
        }
        latest
    }

    pub fn get(&self, message_type: AiMessageType) -> Option<&str> {
        match message_type {
            AiMessageType::WeeklySummary => self.weekly_summary.as_deref(),
            AiMessageType::Encouragement => self.encouragement.as_deref(),
            AiMessageType::DailyTip => self.daily_tip.as_deref(),
        }
    }

    fn slot_mut(&mut self, message_type: AiMessageType) -> &mut Option<String> {
        match message_type {
            AiMessageType::WeeklySummary => &mut self.weekly_summary,
            AiMessageType::Encouragement => &mut self.encouragement,
            AiMessageType::DailyTip => &mut self.daily_tip,
        }
    }
}

/// The exact JSON object the language model is asked to return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedMessages {
    pub weekly_summary: String,
    pub encouragement: String,
    pub daily_tip: String,
}

impl GeneratedMessages {
    pub fn entries(&self) -> [(AiMessageType, &str); 3] {
        [
            (AiMessageType::WeeklySummary, self.weekly_summary.as_str()),
            (AiMessageType::Encouragement, self.encouragement.as_str()),
            (AiMessageType::DailyTip, self.daily_tip.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn message(message_type: AiMessageType, content: &str, age_mins: i64) -> AiMessage {
        AiMessage {
            id: Uuid::new_v4(),
            message_type,
            content: content.into(),
            created_at: Utc::now() - Duration::minutes(age_mins),
        }
    }

    #[test]
    fn test_first_row_per_type_wins() {
        let rows = vec![
            message(AiMessageType::DailyTip, "newest tip", 1),
            message(AiMessageType::WeeklySummary, "summary", 2),
            message(AiMessageType::DailyTip, "older tip", 3),
        ];
        let latest = LatestMessages::from_newest_first(rows);
        assert_eq!(latest.daily_tip.as_deref(), Some("newest tip"));
        assert_eq!(latest.weekly_summary.as_deref(), Some("summary"));
        assert!(latest.encouragement.is_none());
    }

    #[test]
    fn test_empty_when_no_rows() {
        let latest = LatestMessages::from_newest_first(Vec::new());
        assert_eq!(latest, LatestMessages::default());
        let json = serde_json::to_value(&latest).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_message_type_wire_names() {
        assert_eq!(
            serde_json::to_value(AiMessageType::WeeklySummary).unwrap(),
            "weekly_summary"
        );
        assert_eq!(serde_json::to_value(AiMessageType::DailyTip).unwrap(), "daily_tip");
    }

    #[test]
    fn test_generated_messages_requires_all_fields() {
        let json = r#"{"weekly_summary":"a","encouragement":"b"}"#;
        assert!(serde_json::from_str::<GeneratedMessages>(json).is_err());
    }
}
