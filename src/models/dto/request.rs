use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Number;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub userid: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateTopicContentRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub module: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProgressRequest {
    pub topic_id: Option<String>,
    pub status: Option<String>,
    pub progress: Option<Number>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetApiKeysRequest {
    pub provider: Option<String>,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub gemini_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestApiKeyRequest {
    pub provider: Option<String>,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetAgentApiKeysRequest {
    #[serde(default)]
    pub agents: BTreeMap<String, AgentKeyInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentKeyInput {
    pub provider: Option<String>,
    #[serde(default, rename = "apiKey")]
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_keys_request_reads_camel_case_key() {
        let json = serde_json::json!({
            "agents": {
                "quiz": { "provider": "gemini", "apiKey": "g-123" },
                "tutorial": { "provider": "openai" }
            }
        });
        let request: SetAgentApiKeysRequest = serde_json::from_value(json).unwrap();

        assert_eq!(request.agents["quiz"].api_key, "g-123");
        assert_eq!(request.agents["tutorial"].api_key, "");
    }

    #[test]
    fn progress_request_fields_are_optional() {
        let request: UpdateProgressRequest = serde_json::from_str("{}").unwrap();
        assert!(request.topic_id.is_none());
        assert!(request.progress.is_none());
    }
}
