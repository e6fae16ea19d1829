use std::sync::Arc;

use crate::{
    constants::prompts,
    models::domain::AgentName,
    services::{
        agent_key_service::{AgentKeyService, CredentialScope},
        generation_gateway::GenerationGateway,
    },
};

/// The five prompt roles. Each resolves its own credentials by agent name
/// and hands a prompt/instruction pair to the gateway.
pub struct ContentAgents {
    gateway: Arc<GenerationGateway>,
    agent_keys: Arc<AgentKeyService>,
}

impl ContentAgents {
    pub fn new(gateway: Arc<GenerationGateway>, agent_keys: Arc<AgentKeyService>) -> Self {
        Self {
            gateway,
            agent_keys,
        }
    }

    async fn run(
        &self,
        agent: AgentName,
        scope: &CredentialScope,
        prompt: &str,
        system_instruction: &str,
        max_tokens: u32,
    ) -> String {
        let credentials = self.agent_keys.resolve(Some(agent), scope).await;
        log::debug!("Running {} agent with {}", agent, credentials.provider);
        self.gateway
            .generate(prompt, Some(system_instruction), max_tokens, &credentials)
            .await
    }

    pub async fn design_structure(
        &self,
        scope: &CredentialScope,
        course_name: &str,
        course_description: &str,
        outline: Option<&str>,
    ) -> String {
        let prompt = prompts::structure_prompt(course_name, course_description, outline);
        self.run(
            AgentName::CourseStructure,
            scope,
            &prompt,
            prompts::STRUCTURE_DESIGNER_SYSTEM,
            prompts::STRUCTURE_MAX_TOKENS,
        )
        .await
    }

    pub async fn write_lecture_notes(
        &self,
        scope: &CredentialScope,
        topic: &str,
        course: &str,
        module: &str,
    ) -> String {
        let prompt = prompts::lecture_notes_prompt(topic, course, module);
        self.run(
            AgentName::LectureNotes,
            scope,
            &prompt,
            prompts::LECTURE_NOTES_SYSTEM,
            prompts::LECTURE_MAX_TOKENS,
        )
        .await
    }

    pub async fn design_tutorial(
        &self,
        scope: &CredentialScope,
        topic: &str,
        course: &str,
        module: &str,
    ) -> String {
        let prompt = prompts::tutorial_prompt(topic, course, module);
        self.run(
            AgentName::Tutorial,
            scope,
            &prompt,
            prompts::TUTORIAL_DESIGNER_SYSTEM,
            prompts::TUTORIAL_MAX_TOKENS,
        )
        .await
    }

    pub async fn design_practical(
        &self,
        scope: &CredentialScope,
        topic: &str,
        course: &str,
        module: &str,
    ) -> String {
        let prompt = prompts::practical_prompt(topic, course, module);
        self.run(
            AgentName::Practical,
            scope,
            &prompt,
            prompts::PRACTICAL_DESIGNER_SYSTEM,
            prompts::PRACTICAL_MAX_TOKENS,
        )
        .await
    }

    pub async fn create_quiz(
        &self,
        scope: &CredentialScope,
        topic: &str,
        course: &str,
        module: &str,
    ) -> String {
        let prompt = prompts::quiz_prompt(topic, course, module);
        self.run(
            AgentName::Quiz,
            scope,
            &prompt,
            prompts::QUIZ_CREATOR_SYSTEM,
            prompts::QUIZ_MAX_TOKENS,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::dto::request::{AgentKeyInput, SetAgentApiKeysRequest},
        repositories::{AgentKeyRepository, InMemoryDocumentStore},
        services::{
            credentials::ProviderDefaults,
            llm_provider::{MockLlmProvider, MockProviderFactory},
        },
    };

    #[tokio::test]
    async fn each_agent_routes_with_its_own_key_and_budget() {
        let mut factory = MockProviderFactory::new();
        factory
            .expect_build()
            .withf(|_, key| key == "sk-quiz")
            .times(1)
            .returning(|_, _| {
                let mut provider = MockLlmProvider::new();
                provider
                    .expect_generate()
                    .withf(|request| {
                        request.max_tokens == prompts::QUIZ_MAX_TOKENS
                            && request.system_instruction.as_deref()
                                == Some(prompts::QUIZ_CREATOR_SYSTEM)
                    })
                    .returning(|_| Ok("quiz from provider".to_string()));
                Box::new(provider)
            });

        let agent_keys = Arc::new(AgentKeyService::new(
            AgentKeyRepository::new(Arc::new(InMemoryDocumentStore::new())),
            ProviderDefaults::default(),
        ));
        let mut request = SetAgentApiKeysRequest {
            agents: Default::default(),
        };
        request.agents.insert(
            "quiz".to_string(),
            AgentKeyInput {
                provider: None,
                api_key: "sk-quiz".to_string(),
            },
        );
        agent_keys.set_agent_keys(&request).await.unwrap();

        let agents = ContentAgents::new(
            Arc::new(GenerationGateway::new(Arc::new(factory))),
            agent_keys,
        );
        let scope = CredentialScope::default();

        let quiz = agents.create_quiz(&scope, "Lifetimes", "Rust", "Memory").await;
        let lecture = agents
            .write_lecture_notes(&scope, "Lifetimes", "Rust", "Memory")
            .await;

        assert_eq!(quiz, "quiz from provider");
        assert!(lecture.starts_with("# Lecture Notes"));
    }
}
