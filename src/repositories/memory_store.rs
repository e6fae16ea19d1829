use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    repositories::document_store::{CollectionName, DocumentStore},
};

struct StoredDocument {
    seq: u64,
    document: Value,
}

#[derive(Default)]
struct Collections {
    next_seq: u64,
    documents: HashMap<CollectionName, HashMap<String, StoredDocument>>,
}

/// Process-lifetime fallback used when MongoDB is unreachable at startup.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn save(&self, collection: CollectionName, id: &str, document: Value) -> AppResult<()> {
        let Value::Object(mut fields) = document else {
            return Err(AppError::InternalError(format!(
                "Document '{}' in {} must be a JSON object",
                id, collection
            )));
        };
        fields.remove("_id");

        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let docs = inner.documents.entry(collection).or_default();

        match docs.get_mut(id) {
            Some(existing) => {
                if let Value::Object(current) = &mut existing.document {
                    current.extend(fields);
                } else {
                    existing.document = Value::Object(fields);
                }
            }
            None => {
                docs.insert(
                    id.to_string(),
                    StoredDocument {
                        seq: inner.next_seq,
                        document: Value::Object(fields),
                    },
                );
                inner.next_seq += 1;
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, collection: CollectionName, id: &str) -> AppResult<Option<Value>> {
        let inner = self.inner.read().await;
        Ok(inner
            .documents
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|stored| stored.document.clone()))
    }

    async fn find_all(&self, collection: CollectionName) -> AppResult<Vec<Value>> {
        let inner = self.inner.read().await;
        let Some(docs) = inner.documents.get(&collection) else {
            return Ok(vec![]);
        };

        let mut items: Vec<&StoredDocument> = docs.values().collect();
        items.sort_by_key(|stored| stored.seq);
        Ok(items.into_iter().map(|stored| stored.document.clone()).collect())
    }

    async fn delete(&self, collection: CollectionName, id: &str) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .documents
            .get_mut(&collection)
            .and_then(|docs| docs.remove(id))
            .is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
