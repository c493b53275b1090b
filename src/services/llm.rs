//! Minimal client for the OpenAI Responses API, used only by the message
//! generation job. No retries: a failed call fails the whole run.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    text: TextOptions,
}

#[derive(Serialize)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl LlmClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        model: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` asking for a JSON object and returns the raw output
    /// text (possibly empty). Parsing is left to the caller.
    pub async fn complete_json(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ResponsesRequest {
            model: &self.model,
            input: prompt,
            text: TextOptions {
                format: TextFormat {
                    format_type: "json_object",
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::HttpStatus { code, body });
        }

        let body: Value = response.json().await?;
        Ok(extract_output_text(&body))
    }
}

/// `output_text` when present, else the first content part of the first
/// output item, else an empty string.
pub fn extract_output_text(body: &Value) -> String {
    body.get("output_text")
        .and_then(Value::as_str)
        .or_else(|| body["output"][0]["content"][0]["text"].as_str())
        .unwrap_or_default()
        .to_owned()
}
