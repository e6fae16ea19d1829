use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, TopicContent},
        dto::request::GenerateTopicContentRequest,
    },
    repositories::TopicRepository,
    services::{
        agent_key_service::CredentialScope, content_agents::ContentAgents,
        extraction::extract_quiz,
    },
};

pub struct TopicService {
    repository: TopicRepository,
    agents: Arc<ContentAgents>,
}

impl TopicService {
    pub fn new(repository: TopicRepository, agents: Arc<ContentAgents>) -> Self {
        Self { repository, agents }
    }

    /// Runs the four topic agents in order and overwrites any stored content.
    pub async fn generate(
        &self,
        topic_id: &str,
        request: &GenerateTopicContentRequest,
        scope: &CredentialScope,
    ) -> AppResult<TopicContent> {
        let (topic, course, module) = (
            request.topic.as_str(),
            request.course.as_str(),
            request.module.as_str(),
        );
        log::info!("Generating content for topic {} ({})", topic_id, topic);

        let lecture = self
            .agents
            .write_lecture_notes(scope, topic, course, module)
            .await;
        let tutorial = self.agents.design_tutorial(scope, topic, course, module).await;
        let practical = self
            .agents
            .design_practical(scope, topic, course, module)
            .await;
        let quiz_raw = self.agents.create_quiz(scope, topic, course, module).await;

        let quiz = extract_quiz(&quiz_raw).or_fallback("quiz", || Quiz::fallback(topic));

        let content = TopicContent {
            lecture,
            tutorial,
            practical,
            quiz,
        };
        self.repository.save(topic_id, &content).await?;
        log::info!("Stored content for topic {}", topic_id);
        Ok(content)
    }

    pub async fn get(&self, topic_id: &str) -> AppResult<TopicContent> {
        self.repository
            .find_by_id(topic_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Topic content not found".to_string()))
    }
}
