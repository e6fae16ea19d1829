use std::sync::Arc;

use crate::{
    auth::SessionService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AgentKeyRepository, CourseRepository, DocumentStore, InMemoryDocumentStore,
        MongoDocumentStore, ProgressRepository, TopicRepository,
    },
    services::{
        credentials::ProviderDefaults, outline_upload::OutlineStore, AgentKeyService,
        ApiKeyService, ContentAgents, CourseService, GenerationGateway, HttpProviderFactory,
        ProgressService, ProviderFactory, TopicService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionService>,
    pub storage_backend: &'static str,
    pub agent_keys: Arc<AgentKeyService>,
    pub api_keys: Arc<ApiKeyService>,
    pub course_service: Arc<CourseService>,
    pub topic_service: Arc<TopicService>,
    pub progress_service: Arc<ProgressService>,
}

impl AppState {
    /// Connects to MongoDB, degrading to in-memory storage when it is
    /// unreachable, and wires real provider clients.
    pub async fn new(config: Config) -> AppResult<Self> {
        let store: Arc<dyn DocumentStore> = match Database::connect(&config).await {
            Ok(db) => Arc::new(MongoDocumentStore::new(db)),
            Err(e) => {
                log::warn!("MongoDB connection failed: {}", e);
                log::warn!("Falling back to in-memory storage; data will not survive a restart");
                Arc::new(InMemoryDocumentStore::new())
            }
        };
        let factory = Arc::new(HttpProviderFactory::from_config(&config));

        Self::with_components(config, store, factory).await
    }

    /// Builds the state over an explicit store and provider factory.
    pub async fn with_components(
        config: Config,
        store: Arc<dyn DocumentStore>,
        factory: Arc<dyn ProviderFactory>,
    ) -> AppResult<Self> {
        let defaults = ProviderDefaults::from_config(&config);
        let sessions = Arc::new(SessionService::new(
            &config.session_secret,
            config.session_lifetime_hours,
            config.session_cookie_secure,
        ));

        let agent_keys = Arc::new(AgentKeyService::new(
            AgentKeyRepository::new(store.clone()),
            defaults.clone(),
        ));
        if let Err(e) = agent_keys.load().await {
            log::error!("Could not load agent key configurations: {}", e);
        }

        let gateway = Arc::new(GenerationGateway::new(factory.clone()));
        let agents = Arc::new(ContentAgents::new(gateway, agent_keys.clone()));

        let course_service = Arc::new(CourseService::new(
            CourseRepository::new(store.clone()),
            agents.clone(),
            OutlineStore::new(&config.upload_dir),
        ));
        let topic_service = Arc::new(TopicService::new(
            TopicRepository::new(store.clone()),
            agents,
        ));
        let progress_service = Arc::new(ProgressService::new(ProgressRepository::new(
            store.clone(),
        )));
        let api_keys = Arc::new(ApiKeyService::new(factory, defaults));

        log::info!("Storage backend: {}", store.backend_name());

        Ok(Self {
            config: Arc::new(config),
            sessions,
            storage_backend: store.backend_name(),
            agent_keys,
            api_keys,
            course_service,
            topic_service,
            progress_service,
        })
    }
}
