//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{build_prompt, parse_suggestions, response_schema, GatewayError, SuggestionSource};
use crate::schedule::{AiSuggestion, ScheduleItem};
use crate::storage::GatewayConfig;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    timeout: Duration,
}

impl GeminiClient {
    /// Client with default endpoint, model and timeout.
    ///
    /// A missing or blank key is accepted here and reported as
    /// [`GatewayError::MissingCredential`] on the first request.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build from the `[gateway]` config section; the key is resolved from
    /// the environment first.
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.resolve_api_key())
            .with_base_url(&config.base_url)
            .with_model(&config.model)
            .with_temperature(config.temperature)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// JSON body for one request: prompt, JSON-only mode, schema, temperature.
    pub fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "temperature": self.temperature,
            }
        })
    }

    async fn generate(&self, api_key: &str, body: &Value) -> Result<String, GatewayError> {
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = resp.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| GatewayError::Malformed(e.to_string()))?;
        parsed.text().ok_or(GatewayError::EmptyResponse)
    }
}

#[async_trait]
impl SuggestionSource for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn fetch(&self, items: &[ScheduleItem]) -> Result<Vec<AiSuggestion>, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingCredential)?;
        let prompt = build_prompt(items).map_err(|e| GatewayError::Request(e.to_string()))?;
        let body = self.request_body(&prompt);

        debug!(endpoint = %self.endpoint(), items = items.len(), "requesting study suggestions");
        let text = tokio::time::timeout(self.timeout, self.generate(api_key, &body))
            .await
            .map_err(|_| GatewayError::Timeout {
                secs: self.timeout.as_secs(),
            })??;

        parse_suggestions(&text)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}
