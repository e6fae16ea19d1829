use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
    pub userid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SetApiKeysResponse {
    pub message: String,
    pub provider: String,
}

#[derive(Debug, Serialize)]
pub struct ApiKeyStatusResponse {
    pub provider: String,
    pub openai_configured: bool,
    pub gemini_configured: bool,
    pub configured: bool,
}

#[derive(Debug, Serialize)]
pub struct TestApiKeyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestApiKeyResponse {
    pub fn valid(message: impl Into<String>) -> Self {
        TestApiKeyResponse {
            valid: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        TestApiKeyResponse {
            valid: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AgentKeysResponse {
    pub message: String,
    pub agents: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub cors_origins: Vec<String>,
    pub frontend_url: String,
    pub storage: String,
}
