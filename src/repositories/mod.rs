pub mod agent_key_repository;
pub mod course_repository;
pub mod document_store;
pub mod memory_store;
pub mod mongo_store;
pub mod progress_repository;
pub mod topic_repository;

pub use agent_key_repository::AgentKeyRepository;
pub use course_repository::CourseRepository;
pub use document_store::{CollectionName, DocumentStore};
pub use memory_store::InMemoryDocumentStore;
pub use mongo_store::MongoDocumentStore;
pub use progress_repository::ProgressRepository;
pub use topic_repository::TopicRepository;
