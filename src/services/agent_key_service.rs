use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    auth::SessionData,
    errors::{AppError, AppResult},
    models::{
        domain::{AgentKeyConfig, AgentName, ProviderKind},
        dto::request::SetAgentApiKeysRequest,
    },
    repositories::AgentKeyRepository,
    services::credentials::{
        resolve_credentials, CredentialHeaders, ProviderDefaults, ResolvedCredentials,
    },
};

/// Per-request inputs to credential resolution.
#[derive(Clone, Debug, Default)]
pub struct CredentialScope {
    pub headers: CredentialHeaders,
    pub session: SessionData,
}

/// Owns the per-agent key configs: persisted in the store and mirrored in
/// memory so resolution never waits on the database.
pub struct AgentKeyService {
    repository: AgentKeyRepository,
    cache: RwLock<HashMap<AgentName, AgentKeyConfig>>,
    defaults: ProviderDefaults,
}

impl AgentKeyService {
    pub fn new(repository: AgentKeyRepository, defaults: ProviderDefaults) -> Self {
        Self {
            repository,
            cache: RwLock::new(HashMap::new()),
            defaults,
        }
    }

    /// Fills the cache from the store. Called once at startup.
    pub async fn load(&self) -> AppResult<usize> {
        let configs = self.repository.find_all().await?;
        let mut cache = self.cache.write().await;
        cache.clear();
        for config in configs {
            cache.insert(config.agent_name, config);
        }
        log::info!("Loaded {} agent key configuration(s)", cache.len());
        Ok(cache.len())
    }

    /// Validates every entry before saving any. Entries without a key are
    /// skipped. Returns the names of all configured agents afterwards.
    pub async fn set_agent_keys(&self, request: &SetAgentApiKeysRequest) -> AppResult<Vec<String>> {
        let mut accepted = Vec::new();
        for (name, input) in &request.agents {
            let provider = match input.provider.as_deref() {
                None => ProviderKind::OpenAi,
                Some(value) => ProviderKind::parse(value).ok_or_else(|| {
                    AppError::ValidationError(format!("Invalid provider for agent {}", name))
                })?,
            };
            let agent = AgentName::parse(name)
                .ok_or_else(|| AppError::ValidationError(format!("Unknown agent {}", name)))?;

            let api_key = input.api_key.trim();
            if api_key.is_empty() {
                continue;
            }
            if provider == ProviderKind::OpenAi && !api_key.starts_with("sk-") {
                return Err(AppError::ValidationError(format!(
                    "Invalid OpenAI API key format for agent {}",
                    name
                )));
            }
            accepted.push(AgentKeyConfig::new(agent, provider, api_key));
        }

        let mut cache = self.cache.write().await;
        for config in accepted {
            self.repository.save(&config).await?;
            log::info!(
                "Stored {} key for agent {}",
                config.provider,
                config.agent_name
            );
            cache.insert(config.agent_name, config);
        }

        let mut agents: Vec<String> = cache.keys().map(|a| a.to_string()).collect();
        agents.sort();
        Ok(agents)
    }

    pub async fn clear_all(&self) -> AppResult<usize> {
        let mut cache = self.cache.write().await;
        let removed = self.repository.delete_all().await?;
        cache.clear();
        log::info!("Cleared {} agent key configuration(s)", removed);
        Ok(removed)
    }

    pub async fn config_for(&self, agent: AgentName) -> Option<AgentKeyConfig> {
        self.cache.read().await.get(&agent).cloned()
    }

    pub async fn configured_agents(&self) -> Vec<AgentName> {
        let mut agents: Vec<AgentName> = self.cache.read().await.keys().copied().collect();
        agents.sort_by_key(|a| a.as_str());
        agents
    }

    pub async fn resolve(
        &self,
        agent: Option<AgentName>,
        scope: &CredentialScope,
    ) -> ResolvedCredentials {
        let persisted = match agent {
            Some(agent) => self.config_for(agent).await,
            None => None,
        };
        resolve_credentials(
            agent,
            &scope.headers,
            persisted.as_ref(),
            &scope.session,
            &self.defaults,
        )
    }
}
