use thiserror::Error;

use crate::gemini::{GeminiClient, GeminiError};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("No prompt provided")]
    MissingPrompt,

    /// Transport failure or non-200 status. `details` carries the upstream
    /// body verbatim when one was received.
    #[error("Gemini API error: {details}")]
    Upstream { status: Option<u16>, details: String },

    #[error("Unexpected Gemini response format")]
    UnexpectedFormat,
}

impl From<GeminiError> for RelayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Status { status, body } => Self::Upstream {
                status: Some(status.as_u16()),
                details: body,
            },
            GeminiError::Transport(e) => Self::Upstream {
                status: None,
                details: e.to_string(),
            },
            GeminiError::Decode(_) => Self::UnexpectedFormat,
        }
    }
}

/// Forwards prompts to Gemini, optionally under a fixed persona.
#[derive(Debug, Clone)]
pub struct Relay {
    client: GeminiClient,
    system_instruction: Option<String>,
}

impl Relay {
    pub fn new(client: GeminiClient, system_instruction: Option<String>) -> Self {
        Self {
            client,
            system_instruction,
        }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn has_persona(&self) -> bool {
        self.system_instruction.is_some()
    }

    pub async fn submit_prompt(&self, prompt: &str) -> Result<String, RelayError> {
        if prompt.is_empty() {
            return Err(RelayError::MissingPrompt);
        }

        let text = compose_prompt(self.system_instruction.as_deref(), prompt);
        let response = self.client.generate_content(&text).await.map_err(|e| {
            tracing::warn!(model = %self.client.model(), error = %e, "Gemini request failed");
            RelayError::from(e)
        })?;

        match response.first_text() {
            Some(answer) => Ok(answer.to_string()),
            None => {
                tracing::warn!(
                    model = %self.client.model(),
                    candidates = response.candidates.len(),
                    finish_reason = response.first_finish_reason().unwrap_or("none"),
                    "Gemini response had no candidate text"
                );
                Err(RelayError::UnexpectedFormat)
            }
        }
    }
}

fn compose_prompt(system_instruction: Option<&str>, prompt: &str) -> String {
    match system_instruction {
        Some(instruction) => format!("{}\n\n{prompt}", instruction.trim()),
        None => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;

    fn unreachable_relay() -> Relay {
        Relay::new(
            GeminiClient::new(GeminiConfig::new("k", "http://127.0.0.1:1/v1beta", "m")),
            None,
        )
    }

    #[test]
    fn prompt_passes_through_without_persona() {
        assert_eq!(compose_prompt(None, "Why?"), "Why?");
    }

    #[test]
    fn persona_is_prepended() {
        assert_eq!(
            compose_prompt(Some("You are a pirate.\n"), "Why?"),
            "You are a pirate.\n\nWhy?"
        );
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_before_any_network_call() {
        assert!(matches!(
            unreachable_relay().submit_prompt("").await,
            Err(RelayError::MissingPrompt)
        ));
    }

    #[tokio::test]
    async fn whitespace_prompt_is_not_a_validation_error() {
        let err = unreachable_relay().submit_prompt(" \t\n").await.unwrap_err();

        assert!(matches!(err, RelayError::Upstream { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_upstream_error() {
        let err = unreachable_relay().submit_prompt("hello").await.unwrap_err();

        match err {
            RelayError::Upstream { status, details } => {
                assert_eq!(status, None);
                assert!(!details.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
