//! Client for the Gemini `generateContent` endpoint.
//!
//! Only the non-streaming, single-turn, text-only subset of the API is used.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GeminiConfig;

pub const TEMPERATURE: f32 = 1.0;
pub const TOP_P: f32 = 0.95;
pub const TOP_K: u32 = 40;
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("failed to reach Gemini API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode Gemini response: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends `text` as a single user turn and returns the decoded response.
    pub async fn generate_content(
        &self,
        text: &str,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let request = GenerateContentRequest::user_text(text);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = text.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(GeminiError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(GeminiError::Status { status, body });
        }

        let body = response.text().await.map_err(GeminiError::Transport)?;
        serde_json::from_str(&body).map_err(GeminiError::Decode)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    pub fn user_text(text: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(text.to_string()),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

/// Sampling settings sent with every request. Never derived from input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if every level is present.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    pub fn first_finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}
