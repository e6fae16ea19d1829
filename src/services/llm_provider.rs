use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{config::Config, models::domain::ProviderKind};

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub model: Option<String>, // Overrides the provider's configured model
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            max_tokens,
            temperature: 0.7,
            model: None,
        }
    }

    pub fn with_system(mut self, system_instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(system_instruction.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider returned no text")]
    EmptyResponse,
}

/// One text-generation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}

/// Builds a provider client for a resolved provider and key.
#[cfg_attr(test, mockall::automock)]
pub trait ProviderFactory: Send + Sync {
    fn build(&self, kind: ProviderKind, api_key: &str) -> Box<dyn LlmProvider>;
}

pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str, api_base: Option<&str>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_instruction {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": request.prompt }));

        let body = json!({
            "model": request.model.as_deref().unwrap_or(&self.model),
            "messages": messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let response: Value = self
            .client
            .chat()
            .create_byot(body)
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ProviderError::EmptyResponse)
    }
}

pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiProvider {
    pub fn new(http: reqwest::Client, api_key: &str, model: &str, api_base: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

/// Gemini takes no separate system role here, so the instruction is prepended.
fn gemini_prompt(request: &GenerationRequest) -> String {
    match &request.system_instruction {
        Some(system) => format!("{}\n\n{}", system, request.prompt),
        None => request.prompt.clone(),
    }
}

fn gemini_text(response: &Value) -> Option<String> {
    let parts = response
        .pointer("/candidates/0/content/parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base,
            request.model.as_deref().unwrap_or(&self.model)
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": gemini_prompt(request) }] }],
            "generationConfig": {
                "maxOutputTokens": request.max_tokens,
                "temperature": request.temperature,
            },
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Request(e.without_url().to_string()))?;

        gemini_text(&payload).ok_or(ProviderError::EmptyResponse)
    }
}

/// Real network-backed providers, configured once from `Config`.
pub struct HttpProviderFactory {
    http: reqwest::Client,
    openai_model: String,
    openai_api_base: Option<String>,
    gemini_model: String,
    gemini_api_base: String,
}

impl HttpProviderFactory {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            openai_model: config.openai_model.clone(),
            openai_api_base: config.openai_api_base.clone(),
            gemini_model: config.gemini_model.clone(),
            gemini_api_base: config.gemini_api_base.clone(),
        }
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn build(&self, kind: ProviderKind, api_key: &str) -> Box<dyn LlmProvider> {
        match kind {
            ProviderKind::OpenAi => Box::new(OpenAiProvider::new(
                api_key,
                &self.openai_model,
                self.openai_api_base.as_deref(),
            )),
            ProviderKind::Gemini => Box::new(GeminiProvider::new(
                self.http.clone(),
                api_key,
                &self.gemini_model,
                &self.gemini_api_base,
            )),
        }
    }
}
