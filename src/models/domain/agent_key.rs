use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// Strict parse, used where the caller must name a supported provider.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "gemini" => Some(ProviderKind::Gemini),
            _ => None,
        }
    }

    /// Lenient parse: anything that is not Gemini routes to OpenAI.
    pub fn parse_lenient(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five independently credentialed content agents.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentName {
    CourseStructure,
    LectureNotes,
    Tutorial,
    Practical,
    Quiz,
}

impl AgentName {
    pub const ALL: [AgentName; 5] = [
        AgentName::CourseStructure,
        AgentName::LectureNotes,
        AgentName::Tutorial,
        AgentName::Practical,
        AgentName::Quiz,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|agent| agent.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::CourseStructure => "course_structure",
            AgentName::LectureNotes => "lecture_notes",
            AgentName::Tutorial => "tutorial",
            AgentName::Practical => "practical",
            AgentName::Quiz => "quiz",
        }
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted per-agent credential configuration. Stored in `agent_keys`
/// under the agent name; unused key slots are stored as null.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgentKeyConfig {
    pub agent_name: AgentName,
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default)]
    pub openai_key: Option<String>,
    #[serde(default)]
    pub gemini_key: Option<String>,
}

impl AgentKeyConfig {
    /// Holds the key under the selected provider only.
    pub fn new(agent_name: AgentName, provider: ProviderKind, api_key: &str) -> Self {
        let (openai_key, gemini_key) = match provider {
            ProviderKind::OpenAi => (Some(api_key.to_string()), None),
            ProviderKind::Gemini => (None, Some(api_key.to_string())),
        };
        AgentKeyConfig {
            agent_name,
            provider,
            openai_key,
            gemini_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parse_is_case_insensitive() {
        assert_eq!(ProviderKind::parse("Gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse(" OPENAI "), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("claude"), None);
        assert_eq!(ProviderKind::parse_lenient("claude"), ProviderKind::OpenAi);
    }

    #[test]
    fn agent_names_round_trip_through_strings() {
        for agent in AgentName::ALL {
            assert_eq!(AgentName::parse(agent.as_str()), Some(agent));
        }
        assert_eq!(AgentName::parse("default"), None);
    }

    #[test]
    fn agent_config_keeps_key_under_selected_provider() {
        let config = AgentKeyConfig::new(AgentName::Quiz, ProviderKind::Gemini, "g-key");

        assert_eq!(config.gemini_key.as_deref(), Some("g-key"));
        assert!(config.openai_key.is_none());

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["agent_name"], "quiz");
        assert_eq!(json["provider"], "gemini");
        assert!(json["openai_key"].is_null());
    }
}
