//! Generation of the weekly summary / encouragement / daily tip texts.
//!
//! A run reads this week's rest days against the most recent goals row,
//! asks the language model for exactly three short strings and appends them
//! to the message store. Each failure mode is its own error variant; nothing
//! is retried and nothing is inserted unless all three strings parsed.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

use super::dates::{to_local_date_string, week_date_range};
use super::llm::{LlmClient, LlmError};
use super::progress::count_rest_days;
use crate::config::Config;
use crate::db::{MessageStore, RecordStore, Store, StoreError};
use crate::dto::GenerationReport;
use crate::models::ai_message::GeneratedMessages;
use crate::models::goals::DEFAULT_WEEKLY_GOAL;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    #[error("failed to read progress: {0}")]
    Query(#[source] StoreError),

    #[error("language model request failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("invalid AI response format")]
    MalformedOutput { raw: String },

    #[error("failed to store generated messages: {0}")]
    Insert(#[source] StoreError),
}

impl GenerationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingConfig(_) => "missing_configuration",
            Self::Query(_) => "query_failed",
            Self::Upstream(_) => "model_request_failed",
            Self::MalformedOutput { .. } => "invalid_ai_response",
            Self::Insert(_) => "insert_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(_) | Self::MalformedOutput { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::MalformedOutput { raw } => Some(raw),
            _ => None,
        }
    }
}

pub struct MessageGenerator {
    store: Arc<dyn Store>,
    config: Arc<Config>,
}

impl MessageGenerator {
    pub fn new(store: Arc<dyn Store>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    pub async fn run_once(&self, today: NaiveDate) -> Result<GenerationReport, GenerationError> {
        let api_key = self
            .config
            .openai_api_key
            .clone()
            .ok_or(GenerationError::MissingConfig("OPENAI_API_KEY"))?;

        let week = week_date_range(today);

        let weekly_target = self
            .store
            .latest_goals_any_user()
            .await
            .map_err(GenerationError::Query)?
            .map(|g| g.weekly_goal)
            .unwrap_or(DEFAULT_WEEKLY_GOAL);

        let records = self
            .store
            .list_records_any_user(week.start, week.end)
            .await
            .map_err(GenerationError::Query)?;
        let rest_days = count_rest_days(&records);

        let client = LlmClient::new(
            api_key,
            &self.config.openai_base_url,
            self.config.openai_model.clone(),
            Duration::from_secs(self.config.openai_timeout_secs),
        )?;
        let prompt = build_prompt(today, rest_days, weekly_target);
        let raw = client.complete_json(&prompt).await?;
        let data = parse_generated(&raw)?;

        self.store
            .insert_messages(&data)
            .await
            .map_err(GenerationError::Insert)?;

        tracing::info!(
            rest_days,
            weekly_target,
            model = client.model(),
            "AI messages generated"
        );

        Ok(GenerationReport {
            ok: true,
            message: "AI messages generated".into(),
            week,
            rest_days,
            weekly_target,
            data,
        })
    }
}

pub fn build_prompt(today: NaiveDate, rest_days: i64, weekly_target: i32) -> String {
    format!(
        r#"あなたは「ギャルっぽく、優しく励ます」友達です。
進捗に応じてギャルっぽい励ましの言葉を3つ生成してください。
お酒に無理に絡めなくてOK。進捗や頑張りにフォーカスして、短く軽く励まして。

条件:
- 日本語
- 1文〜2文
- 説教しない
- 明るい/軽いノリ
- 「えぐい」「マジ」「〜だよ」などのギャル語OK
- 進捗に対しての励まし・ねぎらいに徹する

入力:
- 今日は {today}
- 今週の休肝日数: {rest_days}日
- 今週の目標: {weekly_target}日

- weekly_summary: 今週の進捗を一言で（例: 今週2/3日達成中！）
- encouragement: 進捗に合わせた励まし（目標達成なら祝福、まだなら「できてるのえぐい」系）
- daily_tip: 今日の1文。生活全般・休息・ペース配分など、進捗に関連した短い励まし

出力は必ず次のJSONのみ:
{{
  "weekly_summary": "...",
  "encouragement": "...",
  "daily_tip": "..."
}}"#,
        today = to_local_date_string(today),
    )
}

/// Model output must be exactly the three-string JSON object.
pub fn parse_generated(raw: &str) -> Result<GeneratedMessages, GenerationError> {
    serde_json::from_str(raw.trim()).map_err(|_| GenerationError::MalformedOutput {
        raw: raw.to_owned(),
    })
}

/// Runs the generation job every `interval_secs`. Failures are logged and the
/// worker waits for the next tick.
pub fn spawn_generation_worker(generator: Arc<MessageGenerator>, config: Arc<Config>) {
    let interval_secs = config.ai_generation_interval_secs;
    if interval_secs == 0 {
        tracing::info!("Scheduled AI message generation disabled");
        return;
    }

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // first tick fires immediately; skip it so startup doesn't call the model
        interval.tick().await;
        loop {
            interval.tick().await;
            match generator.run_once(config.local_today()).await {
                Ok(report) => {
                    tracing::info!(rest_days = report.rest_days, "Scheduled generation complete");
                }
                Err(e) => {
                    tracing::error!(error = %e, kind = e.kind(), "Scheduled generation failed");
                }
            }
        }
    });
}
