use std::{collections::HashMap, fmt};

use actix_web::http::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::SessionData,
    config::Config,
    models::domain::{AgentKeyConfig, AgentName, ProviderKind},
};

pub const PROVIDER_HEADER: &str = "x-api-provider";
pub const OPENAI_KEY_HEADER: &str = "x-openai-api-key";
pub const GEMINI_KEY_HEADER: &str = "x-gemini-api-key";

/// Provider and key values supplied by one layer. Empty strings never make it in.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct KeyOverrides {
    pub provider: Option<String>,
    pub openai_key: Option<String>,
    pub gemini_key: Option<String>,
}

impl fmt::Debug for KeyOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyOverrides")
            .field("provider", &self.provider)
            .field("openai_key", &self.openai_key.as_ref().map(|_| "***"))
            .field("gemini_key", &self.gemini_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Credential overrides carried on a single request.
#[derive(Clone, Debug, Default)]
pub struct CredentialHeaders {
    pub generic: KeyOverrides,
    pub agents: HashMap<AgentName, KeyOverrides>,
}

impl CredentialHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let generic = KeyOverrides {
            provider: read(PROVIDER_HEADER),
            openai_key: read(OPENAI_KEY_HEADER),
            gemini_key: read(GEMINI_KEY_HEADER),
        };

        let agents = AgentName::ALL
            .into_iter()
            .filter_map(|agent| {
                let overrides = KeyOverrides {
                    provider: read(&format!("x-agent-{}-provider", agent)),
                    openai_key: read(&format!("x-agent-{}-openai-key", agent)),
                    gemini_key: read(&format!("x-agent-{}-gemini-key", agent)),
                };
                (overrides != KeyOverrides::default()).then_some((agent, overrides))
            })
            .collect();

        Self { generic, agents }
    }

    pub fn agent(&self, agent: AgentName) -> Option<&KeyOverrides> {
        self.agents.get(&agent)
    }
}

/// Server-wide keys from the environment, the last resort.
#[derive(Clone, Default)]
pub struct ProviderDefaults {
    pub openai_key: Option<SecretString>,
    pub gemini_key: Option<SecretString>,
}

impl ProviderDefaults {
    pub fn from_config(config: &Config) -> Self {
        Self {
            openai_key: config.openai_api_key.clone(),
            gemini_key: config.gemini_api_key.clone(),
        }
    }

    fn openai(&self) -> Option<String> {
        self.openai_key
            .as_ref()
            .map(|key| key.expose_secret().to_string())
    }

    fn gemini(&self) -> Option<String> {
        self.gemini_key
            .as_ref()
            .map(|key| key.expose_secret().to_string())
    }
}

/// The outcome of resolution: which provider to call and with which keys.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub provider: ProviderKind,
    pub openai_key: Option<String>,
    pub gemini_key: Option<String>,
}

impl ResolvedCredentials {
    /// Key for the selected provider, if one was found.
    pub fn active_key(&self) -> Option<&str> {
        match self.provider {
            ProviderKind::OpenAi => self.openai_key.as_deref(),
            ProviderKind::Gemini => self.gemini_key.as_deref(),
        }
    }
}

impl fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("provider", &self.provider)
            .field("openai_key", &self.openai_key.is_some())
            .field("gemini_key", &self.gemini_key.is_some())
            .finish()
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn first_of<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().next()
}

/// Picks provider and keys for one generation call.
///
/// Layers, highest first: the agent's own request headers, the agent's
/// persisted config, the generic request headers, the session, and the
/// environment. A persisted config is authoritative for its agent: when one
/// exists only the agent headers may override it. Each field is resolved
/// independently and empty values never win.
pub fn resolve_credentials(
    agent: Option<AgentName>,
    headers: &CredentialHeaders,
    persisted: Option<&AgentKeyConfig>,
    session: &SessionData,
    defaults: &ProviderDefaults,
) -> ResolvedCredentials {
    let agent_headers = agent
        .and_then(|agent| headers.agent(agent))
        .cloned()
        .unwrap_or_default();

    let persisted = persisted.filter(|config| Some(config.agent_name) == agent);
    if let Some(config) = persisted {
        return ResolvedCredentials {
            provider: agent_headers
                .provider
                .as_deref()
                .map(ProviderKind::parse_lenient)
                .unwrap_or(config.provider),
            openai_key: first_of([
                agent_headers.openai_key,
                non_empty(config.openai_key.as_ref()),
            ]),
            gemini_key: first_of([
                agent_headers.gemini_key,
                non_empty(config.gemini_key.as_ref()),
            ]),
        };
    }

    let provider = first_of([
        agent_headers.provider,
        headers.generic.provider.clone(),
        non_empty(session.api_provider.as_ref()),
    ]);

    ResolvedCredentials {
        provider: provider
            .as_deref()
            .map(ProviderKind::parse_lenient)
            .unwrap_or_default(),
        openai_key: first_of([
            agent_headers.openai_key,
            headers.generic.openai_key.clone(),
            non_empty(session.openai_api_key.as_ref()),
            defaults.openai(),
        ]),
        gemini_key: first_of([
            agent_headers.gemini_key,
            headers.generic.gemini_key.clone(),
            non_empty(session.gemini_api_key.as_ref()),
            defaults.gemini(),
        ]),
    }
}
