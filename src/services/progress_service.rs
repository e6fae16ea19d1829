use std::collections::BTreeMap;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Progress, dto::request::UpdateProgressRequest},
    repositories::ProgressRepository,
};

pub struct ProgressService {
    repository: ProgressRepository,
}

impl ProgressService {
    pub fn new(repository: ProgressRepository) -> Self {
        Self { repository }
    }

    /// One record per topic; repeated updates replace the previous values.
    pub async fn update(&self, request: UpdateProgressRequest) -> AppResult<Progress> {
        let topic_id = request
            .topic_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::ValidationError("topic_id is required".to_string()))?;

        let progress = Progress::new(&topic_id, request.status, request.progress);
        self.repository.upsert(&progress).await?;
        Ok(progress)
    }

    /// All progress records keyed by topic id.
    pub async fn all(&self) -> AppResult<BTreeMap<String, Progress>> {
        let records = self.repository.find_all().await?;
        Ok(records
            .into_iter()
            .map(|record| (record.topic_id.clone(), record))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Number;

    use super::*;
    use crate::repositories::InMemoryDocumentStore;

    fn service() -> ProgressService {
        ProgressService::new(ProgressRepository::new(Arc::new(
            InMemoryDocumentStore::new(),
        )))
    }

    fn update(topic_id: Option<&str>, status: &str, progress: u64) -> UpdateProgressRequest {
        UpdateProgressRequest {
            topic_id: topic_id.map(str::to_string),
            status: Some(status.to_string()),
            progress: Some(Number::from(progress)),
        }
    }

    #[tokio::test]
    async fn repeated_updates_keep_one_record_with_latest_values() {
        let service = service();

        service.update(update(Some("t1"), "in-progress", 50)).await.unwrap();
        service.update(update(Some("t1"), "in-progress", 50)).await.unwrap();
        service.update(update(Some("t1"), "completed", 100)).await.unwrap();

        let all = service.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["t1"].status, "completed");
        assert_eq!(all["t1"].progress, Number::from(100));
    }

    #[tokio::test]
    async fn missing_topic_id_is_rejected() {
        let service = service();

        let err = service.update(update(None, "x", 1)).await.unwrap_err();
        assert_eq!(err.message(), "topic_id is required");

        let err = service.update(update(Some(""), "x", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(service.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn defaults_fill_missing_fields() {
        let service = service();

        let progress = service
            .update(UpdateProgressRequest {
                topic_id: Some("t9".to_string()),
                status: None,
                progress: None,
            })
            .await
            .unwrap();

        assert_eq!(progress.status, "not-started");
        assert_eq!(progress.progress, Number::from(0));
    }
}
