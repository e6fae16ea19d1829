use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::TopicContent,
    repositories::document_store::{CollectionName, DocumentStore},
};

/// Topic content keyed by the caller-supplied topic id.
pub struct TopicRepository {
    store: Arc<dyn DocumentStore>,
}

impl TopicRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, topic_id: &str, content: &TopicContent) -> AppResult<()> {
        let document = serde_json::to_value(content)?;
        self.store
            .save(CollectionName::Topics, topic_id, document)
            .await
    }

    pub async fn find_by_id(&self, topic_id: &str) -> AppResult<Option<TopicContent>> {
        match self.store.find_by_id(CollectionName::Topics, topic_id).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }
}
