//! Interactive client for the relay's `/ask` endpoint.

use std::io::Write;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:5000/ask";
pub const EXIT_KEYWORD: &str = "exit";
const NO_RESPONSE: &str = "[No response]";

#[derive(Serialize)]
struct PromptBody<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct AnswerBody {
    response: Option<String>,
}

/// What the relay said about one prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Answer(Option<String>),
    /// Raw body of a non-200 response.
    Failure(String),
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    url: String,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn ask(&self, prompt: &str) -> Result<Reply, reqwest::Error> {
        let response = self
            .client
            .post(&self.url)
            .json(&PromptBody { prompt })
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Ok(Reply::Failure(response.text().await?));
        }

        let body: AnswerBody = response.json().await?;
        Ok(Reply::Answer(body.response))
    }
}

pub fn is_exit(line: &str) -> bool {
    line.eq_ignore_ascii_case(EXIT_KEYWORD)
}

/// Reads prompts from `input` until `exit` or end of input, printing each
/// reply to `output`. Errors for a single turn are printed and the loop goes on.
pub async fn run_session<R, W>(
    client: &RelayClient,
    input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "Ask Gemini (type '{EXIT_KEYWORD}' to quit):")?;
    let mut lines = input.lines();

    loop {
        write!(output, "You: ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };
        if is_exit(&line) {
            break;
        }

        match client.ask(&line).await {
            Ok(Reply::Answer(answer)) => {
                writeln!(output, "Gemini: {}", answer.as_deref().unwrap_or(NO_RESPONSE))?
            }
            Ok(Reply::Failure(body)) => writeln!(output, "Error: {body}")?,
            Err(e) => {
                tracing::debug!(url = %client.url(), error = %e, "Relay request failed");
                writeln!(output, "Error: {e}")?
            }
        }
    }

    Ok(())
}
