use std::env;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Upstream connection settings.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl GeminiConfig {
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into(),
            model: model.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    /// Persona text prepended to every prompt. `None` forwards prompts as-is.
    pub system_instruction: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        // Missing key is not fatal here; the upstream rejects the first call.
        let api_key = lookup("GEMINI_API_KEY").unwrap_or_default();
        let api_base = lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            host,
            port,
            gemini: GeminiConfig::new(api_key, api_base, model),
            system_instruction: non_blank(lookup("SYSTEM_INSTRUCTION")),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
