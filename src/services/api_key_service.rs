use std::sync::Arc;

use crate::{
    auth::SessionData,
    errors::{AppError, AppResult},
    models::{
        domain::ProviderKind,
        dto::{
            request::{SetApiKeysRequest, TestApiKeyRequest},
            response::{ApiKeyStatusResponse, TestApiKeyResponse},
        },
    },
    services::{
        credentials::{resolve_credentials, CredentialHeaders, ProviderDefaults},
        llm_provider::{GenerationRequest, ProviderFactory},
    },
};

const OPENAI_TEST_MODEL: &str = "gpt-3.5-turbo";
const TEST_PROMPT: &str = "test";
const TEST_MAX_TOKENS: u32 = 5;

fn invalid_provider() -> AppError {
    AppError::ValidationError(r#"Invalid provider. Must be "openai" or "gemini""#.to_string())
}

fn parse_provider(value: Option<&str>) -> AppResult<ProviderKind> {
    match value {
        None => Ok(ProviderKind::OpenAi),
        Some(value) => ProviderKind::parse(value).ok_or_else(invalid_provider),
    }
}

/// Session-scoped keys and live key checks.
pub struct ApiKeyService {
    factory: Arc<dyn ProviderFactory>,
    defaults: ProviderDefaults,
}

impl ApiKeyService {
    pub fn new(factory: Arc<dyn ProviderFactory>, defaults: ProviderDefaults) -> Self {
        Self { factory, defaults }
    }

    /// Validates and stores keys in the session. Returns the selected provider.
    pub fn set_session_keys(
        &self,
        session: &mut SessionData,
        request: &SetApiKeysRequest,
    ) -> AppResult<ProviderKind> {
        let provider = parse_provider(request.provider.as_deref())?;
        let openai_key = request.openai_api_key.trim();
        let gemini_key = request.gemini_api_key.trim();

        match provider {
            ProviderKind::OpenAi if openai_key.is_empty() => {
                return Err(AppError::ValidationError(
                    "OpenAI API key is required".to_string(),
                ))
            }
            ProviderKind::OpenAi if !openai_key.starts_with("sk-") => {
                return Err(AppError::ValidationError(
                    "Invalid OpenAI API key format".to_string(),
                ))
            }
            ProviderKind::Gemini if gemini_key.is_empty() => {
                return Err(AppError::ValidationError(
                    "Gemini API key is required".to_string(),
                ))
            }
            _ => {}
        }

        session.api_provider = Some(provider.to_string());
        if !openai_key.is_empty() {
            session.openai_api_key = Some(openai_key.to_string());
        }
        if !gemini_key.is_empty() {
            session.gemini_api_key = Some(gemini_key.to_string());
        }
        Ok(provider)
    }

    /// What a provider-agnostic call would use, ignoring request headers.
    pub fn status(&self, session: &SessionData) -> ApiKeyStatusResponse {
        let resolved = resolve_credentials(
            None,
            &CredentialHeaders::default(),
            None,
            session,
            &self.defaults,
        );
        ApiKeyStatusResponse {
            provider: resolved.provider.to_string(),
            openai_configured: resolved.openai_key.is_some(),
            gemini_configured: resolved.gemini_key.is_some(),
            configured: resolved.active_key().is_some(),
        }
    }

    /// Makes one tiny live call. Malformed input is an error; a failed call
    /// is a normal `valid: false` answer.
    pub async fn test_key(&self, request: &TestApiKeyRequest) -> AppResult<TestApiKeyResponse> {
        let provider = parse_provider(request.provider.as_deref())?;
        let api_key = request.api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::ValidationError("API key is required".to_string()));
        }
        if provider == ProviderKind::OpenAi && !api_key.starts_with("sk-") {
            return Err(AppError::ValidationError(
                "Invalid OpenAI API key format".to_string(),
            ));
        }

        let mut test_request = GenerationRequest::new(TEST_PROMPT, TEST_MAX_TOKENS);
        if provider == ProviderKind::OpenAi {
            test_request = test_request.with_model(OPENAI_TEST_MODEL);
        }

        let label = provider_label(provider);
        match self.factory.build(provider, api_key).generate(&test_request).await {
            Ok(_) => Ok(TestApiKeyResponse::valid(format!("{} API key is valid", label))),
            Err(e) => {
                let message = e.to_string();
                log::info!("{} key test failed: {}", label, message);
                if is_invalid_key_error(provider, &message) {
                    Ok(TestApiKeyResponse::invalid(format!("Invalid {} API key", label)))
                } else {
                    Ok(TestApiKeyResponse::invalid(format!(
                        "API test failed: {}",
                        message
                    )))
                }
            }
        }
    }
}

fn provider_label(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenAi => "OpenAI",
        ProviderKind::Gemini => "Gemini",
    }
}

fn is_invalid_key_error(provider: ProviderKind, message: &str) -> bool {
    let markers: &[&str] = match provider {
        ProviderKind::OpenAi => &["Invalid API key", "Incorrect API key"],
        ProviderKind::Gemini => &["API_KEY_INVALID", "Invalid API key"],
    };
    markers.iter().any(|marker| message.contains(marker))
}
