use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_document, Bson, Document},
    options::{FindOptions, UpdateOptions},
};
use serde_json::Value;

use crate::{
    db::Database,
    errors::AppResult,
    repositories::document_store::{CollectionName, DocumentStore},
};

pub struct MongoDocumentStore {
    db: Database,
}

impl MongoDocumentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn into_json(mut document: Document) -> Value {
    document.remove("_id");
    Bson::Document(document).into_relaxed_extjson()
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn save(&self, collection: CollectionName, id: &str, document: Value) -> AppResult<()> {
        let mut fields = to_document(&document)?;
        fields.remove("_id");

        let options = UpdateOptions::builder().upsert(true).build();
        self.db
            .get_collection(collection.as_str())
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .with_options(options)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, collection: CollectionName, id: &str) -> AppResult<Option<Value>> {
        let document = self
            .db
            .get_collection(collection.as_str())
            .find_one(doc! { "_id": id })
            .await?;
        Ok(document.map(into_json))
    }

    async fn find_all(&self, collection: CollectionName) -> AppResult<Vec<Value>> {
        let find_options = FindOptions::builder()
            .projection(doc! { "_id": 0 })
            .build();

        let cursor = self
            .db
            .get_collection(collection.as_str())
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(into_json).collect())
    }

    async fn delete(&self, collection: CollectionName, id: &str) -> AppResult<bool> {
        let result = self
            .db
            .get_collection(collection.as_str())
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
