use std::sync::Arc;

use serde_json::Value;

use crate::{
    errors::AppResult,
    models::domain::AgentKeyConfig,
    repositories::document_store::{CollectionName, DocumentStore},
};

pub struct AgentKeyRepository {
    store: Arc<dyn DocumentStore>,
}

impl AgentKeyRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, config: &AgentKeyConfig) -> AppResult<()> {
        let document = serde_json::to_value(config)?;
        self.store
            .save(CollectionName::AgentKeys, config.agent_name.as_str(), document)
            .await
    }

    /// Entries whose agent name is not one of the known agents are skipped.
    pub async fn find_all(&self) -> AppResult<Vec<AgentKeyConfig>> {
        let documents = self.store.find_all(CollectionName::AgentKeys).await?;
        Ok(documents
            .into_iter()
            .filter_map(|document| match serde_json::from_value(document) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("Ignoring unreadable agent key entry: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Removes every stored entry, including ones this build cannot parse.
    pub async fn delete_all(&self) -> AppResult<usize> {
        let documents = self.store.find_all(CollectionName::AgentKeys).await?;
        let mut removed = 0;
        for document in documents {
            if let Some(name) = document.get("agent_name").and_then(Value::as_str) {
                if self.store.delete(CollectionName::AgentKeys, name).await? {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}
