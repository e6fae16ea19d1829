use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::Progress,
    repositories::document_store::{CollectionName, DocumentStore},
};

pub struct ProgressRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProgressRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn upsert(&self, progress: &Progress) -> AppResult<()> {
        let document = serde_json::to_value(progress)?;
        self.store
            .save(CollectionName::Progress, &progress.topic_id, document)
            .await
    }

    pub async fn find_all(&self) -> AppResult<Vec<Progress>> {
        let documents = self.store.find_all(CollectionName::Progress).await?;
        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            match serde_json::from_value(document) {
                Ok(progress) => records.push(progress),
                Err(e) => log::warn!("Skipping malformed progress document: {}", e),
            }
        }
        Ok(records)
    }
}
