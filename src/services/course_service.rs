use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Course, CourseStructure},
    repositories::CourseRepository,
    services::{
        agent_key_service::CredentialScope,
        content_agents::ContentAgents,
        extraction::{extract_json, Extraction},
        outline_upload::{OutlineStore, OutlineUpload},
    },
};

#[derive(Debug, Clone, Default)]
pub struct NewCourse {
    pub name: String,
    pub description: String,
    pub outline: Option<OutlineUpload>,
}

pub struct CourseService {
    repository: CourseRepository,
    agents: Arc<ContentAgents>,
    outlines: OutlineStore,
}

impl CourseService {
    pub fn new(repository: CourseRepository, agents: Arc<ContentAgents>, outlines: OutlineStore) -> Self {
        Self {
            repository,
            agents,
            outlines,
        }
    }

    pub async fn create(&self, request: NewCourse) -> AppResult<Course> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError("Course name is required".to_string()));
        }

        let mut course = Course::new(name, &request.description);
        if let Some(upload) = &request.outline {
            course.outline_file = self.outlines.save(&course.id, upload).await?;
        }

        self.repository.save(&course).await?;
        log::info!("Created course {} ({})", course.id, course.name);
        Ok(course)
    }

    /// Replaces the course's modules with a freshly designed structure. Always
    /// leaves at least one module behind.
    pub async fn generate_structure(&self, id: &str, scope: &CredentialScope) -> AppResult<Course> {
        let mut course = self.get(id).await?;

        let outline = match &course.outline_file {
            Some(path) => self.outlines.read_text(path).await,
            None => None,
        };

        let raw = self
            .agents
            .design_structure(scope, &course.name, &course.description, outline.as_deref())
            .await;

        let structure = match extract_json::<CourseStructure>(&raw) {
            Extraction::Parsed(structure) if structure.modules.is_empty() => {
                Extraction::Fallback("structure has no modules".to_string())
            }
            other => other,
        }
        .or_fallback("course structure", CourseStructure::fallback);

        course.modules = structure.modules;
        self.repository.save(&course).await?;
        log::info!(
            "Course {} now has {} module(s)",
            course.id,
            course.modules.len()
        );
        Ok(course)
    }

    pub async fn get(&self, id: &str) -> AppResult<Course> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<Course>> {
        self.repository.find_all().await
    }
}
