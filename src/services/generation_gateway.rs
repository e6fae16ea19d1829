use std::sync::Arc;

use crate::{
    constants::mock_responses::{
        MOCK_GENERIC, MOCK_LECTURE, MOCK_PRACTICAL, MOCK_QUIZ, MOCK_STRUCTURE, MOCK_TUTORIAL,
    },
    services::{
        credentials::ResolvedCredentials,
        llm_provider::{GenerationRequest, ProviderFactory},
    },
};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Single entry point for text generation. Never fails: a missing key or a
/// provider error yields placeholder content instead.
pub struct GenerationGateway {
    factory: Arc<dyn ProviderFactory>,
    temperature: f32,
}

impl GenerationGateway {
    pub fn new(factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            factory,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        max_tokens: u32,
        credentials: &ResolvedCredentials,
    ) -> String {
        let Some(api_key) = credentials.active_key() else {
            log::debug!(
                "No {} key available, serving placeholder content",
                credentials.provider
            );
            return mock_response(prompt).to_string();
        };

        let mut request =
            GenerationRequest::new(prompt, max_tokens).with_temperature(self.temperature);
        if let Some(system) = system_instruction {
            request = request.with_system(system);
        }

        let provider = self.factory.build(credentials.provider, api_key);
        match provider.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("{} generation failed: {}", credentials.provider, e);
                mock_response(prompt).to_string()
            }
        }
    }
}

/// Placeholder chosen from the prompt text. Categories are tried in
/// structure, lecture, tutorial, practical, quiz order; each matches on its
/// role phrase or its keywords.
pub fn mock_response(prompt: &str) -> &'static str {
    let prompt = prompt.to_lowercase();
    let has = |needle: &str| prompt.contains(needle);

    let categories = [
        (has("course structure") || has("breakdown"), MOCK_STRUCTURE),
        (
            has("lecture notes writer") || (has("lecture") && has("notes")),
            MOCK_LECTURE,
        ),
        (
            has("tutorial exercise designer") || (has("tutorial") && has("exercise")),
            MOCK_TUTORIAL,
        ),
        (
            has("practical exercise designer") || (has("practical") && has("exercise")),
            MOCK_PRACTICAL,
        ),
        (has("quiz"), MOCK_QUIZ),
    ];

    categories
        .into_iter()
        .find_map(|(matched, response)| matched.then_some(response))
        .unwrap_or(MOCK_GENERIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::prompts,
        models::domain::ProviderKind,
        services::llm_provider::{MockLlmProvider, MockProviderFactory, ProviderError},
    };

    fn credentials(key: Option<&str>) -> ResolvedCredentials {
        ResolvedCredentials {
            provider: ProviderKind::OpenAi,
            openai_key: key.map(str::to_string),
            gemini_key: None,
        }
    }

    #[test]
    fn agent_prompts_map_to_placeholders() {
        assert_eq!(
            mock_response(&prompts::structure_prompt("Rust", "", None)),
            MOCK_STRUCTURE
        );
        assert_eq!(
            mock_response(&prompts::lecture_notes_prompt("a", "b", "c")),
            MOCK_LECTURE
        );
        assert_eq!(
            mock_response(&prompts::practical_prompt("a", "b", "c")),
            MOCK_PRACTICAL
        );
        assert_eq!(
            mock_response(&prompts::quiz_prompt("a", "b", "c")),
            MOCK_QUIZ
        );
        assert_eq!(mock_response("hello"), MOCK_GENERIC);
    }

    #[test]
    fn earlier_categories_win_over_later_role_phrases() {
        assert_eq!(mock_response("a quiz about course structure"), MOCK_STRUCTURE);
        assert_eq!(mock_response("lecture notes with a quiz"), MOCK_LECTURE);
        assert_eq!(
            mock_response("As a Practical Exercise Designer, build on the lecture notes"),
            MOCK_LECTURE
        );
        // The tutorial prompt refers back to the lecture notes.
        assert_eq!(
            mock_response(&prompts::tutorial_prompt("a", "b", "c")),
            MOCK_LECTURE
        );
        assert_eq!(mock_response("As a Tutorial Exercise Designer"), MOCK_TUTORIAL);
    }

    #[tokio::test]
    async fn missing_key_serves_placeholder_without_calling_provider() {
        let mut factory = MockProviderFactory::new();
        factory.expect_build().never();
        let gateway = GenerationGateway::new(Arc::new(factory));

        let text = gateway
            .generate("As a Quiz Creator, ...", None, 100, &credentials(None))
            .await;

        assert_eq!(text, MOCK_QUIZ);
    }

    #[tokio::test]
    async fn provider_text_is_returned_with_fixed_temperature() {
        let mut factory = MockProviderFactory::new();
        factory
            .expect_build()
            .withf(|kind, key| *kind == ProviderKind::OpenAi && key == "sk-live")
            .times(1)
            .returning(|_, _| {
                let mut provider = MockLlmProvider::new();
                provider
                    .expect_generate()
                    .withf(|request| {
                        request.temperature == DEFAULT_TEMPERATURE
                            && request.max_tokens == 250
                            && request.system_instruction.as_deref() == Some("system")
                    })
                    .returning(|_| Ok("real content".to_string()));
                Box::new(provider)
            });
        let gateway = GenerationGateway::new(Arc::new(factory));

        let text = gateway
            .generate("prompt", Some("system"), 250, &credentials(Some("sk-live")))
            .await;

        assert_eq!(text, "real content");
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_placeholder() {
        let mut factory = MockProviderFactory::new();
        factory.expect_build().returning(|_, _| {
            let mut provider = MockLlmProvider::new();
            provider
                .expect_generate()
                .returning(|_| Err(ProviderError::Request("connection reset".to_string())));
            Box::new(provider)
        });
        let gateway = GenerationGateway::new(Arc::new(factory));

        let text = gateway
            .generate(
                &prompts::lecture_notes_prompt("a", "b", "c"),
                None,
                100,
                &credentials(Some("sk-live")),
            )
            .await;

        assert_eq!(text, MOCK_LECTURE);
    }
}
