pub mod agent_key_service;
pub mod api_key_service;
pub mod content_agents;
pub mod course_service;
pub mod credentials;
pub mod extraction;
pub mod generation_gateway;
pub mod llm_provider;
pub mod outline_upload;
pub mod progress_service;
pub mod topic_service;

pub use agent_key_service::{AgentKeyService, CredentialScope};
pub use api_key_service::ApiKeyService;
pub use content_agents::ContentAgents;
pub use course_service::{CourseService, NewCourse};
pub use generation_gateway::GenerationGateway;
pub use llm_provider::{HttpProviderFactory, LlmProvider, ProviderFactory};
pub use progress_service::ProgressService;
pub use topic_service::TopicService;
