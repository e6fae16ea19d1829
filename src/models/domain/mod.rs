pub mod agent_key;
pub mod course;
pub mod progress;
pub mod topic_content;
pub use agent_key::{AgentKeyConfig, AgentName, ProviderKind};
pub use course::{Course, CourseModule, CourseStructure, ModuleTopic};
pub use progress::Progress;
pub use topic_content::{Quiz, QuizQuestion, TopicContent};
