use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppResult;

/// The four logical document groupings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Courses,
    Topics,
    Progress,
    AgentKeys,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Courses => "courses",
            CollectionName::Topics => "topics",
            CollectionName::Progress => "progress",
            CollectionName::AgentKeys => "agent_keys",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value access over JSON documents, one keyspace per collection.
///
/// `save` is an upsert that merges top-level fields into an existing document
/// (MongoDB `$set` semantics). Returned documents never carry `_id`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn save(&self, collection: CollectionName, id: &str, document: Value) -> AppResult<()>;
    async fn find_by_id(&self, collection: CollectionName, id: &str) -> AppResult<Option<Value>>;
    async fn find_all(&self, collection: CollectionName) -> AppResult<Vec<Value>>;
    /// Returns whether a document was removed.
    async fn delete(&self, collection: CollectionName, id: &str) -> AppResult<bool>;
    fn backend_name(&self) -> &'static str;
}
