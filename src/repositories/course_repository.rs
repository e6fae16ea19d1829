use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::Course,
    repositories::document_store::{CollectionName, DocumentStore},
};

pub struct CourseRepository {
    store: Arc<dyn DocumentStore>,
}

impl CourseRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, course: &Course) -> AppResult<()> {
        let document = serde_json::to_value(course)?;
        self.store
            .save(CollectionName::Courses, &course.id, document)
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        match self.store.find_by_id(CollectionName::Courses, id).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Course>> {
        let documents = self.store.find_all(CollectionName::Courses).await?;
        let mut courses = Vec::with_capacity(documents.len());
        for document in documents {
            match serde_json::from_value(document) {
                Ok(course) => courses.push(course),
                Err(e) => log::warn!("Skipping malformed course document: {}", e),
            }
        }
        Ok(courses)
    }
}
