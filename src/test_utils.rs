use std::sync::Arc;

use actix_web::cookie::Cookie;

use crate::{
    app_state::AppState,
    auth::SessionData,
    config::Config,
    repositories::{DocumentStore, InMemoryDocumentStore},
    services::{HttpProviderFactory, ProviderFactory},
};

/// State over in-memory storage and the test config. No provider keys are
/// configured, so generation serves placeholder content.
pub async fn test_state() -> AppState {
    let config = Config::test_config();
    let factory = Arc::new(HttpProviderFactory::from_config(&config));
    test_state_with_factory(factory).await
}

pub async fn test_state_with_factory(factory: Arc<dyn ProviderFactory>) -> AppState {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    AppState::with_components(Config::test_config(), store, factory)
        .await
        .expect("test state should build")
}

/// A cookie carrying an authenticated session.
pub fn login_cookie(state: &AppState) -> Cookie<'static> {
    session_cookie(state, &logged_in_session())
}

pub fn session_cookie(state: &AppState, session: &SessionData) -> Cookie<'static> {
    state
        .sessions
        .issue_cookie(session)
        .expect("session cookie should sign")
}

pub fn logged_in_session() -> SessionData {
    let mut session = SessionData::default();
    session.login("chuahlearn");
    session
}

pub mod test_helpers {
    use actix_web::{body::MessageBody, dev::ServiceResponse};

    /// Reads a JSON body out of a test response.
    pub async fn json_body<B: MessageBody>(response: ServiceResponse<B>) -> serde_json::Value {
        let body = actix_web::test::read_body(response).await;
        serde_json::from_slice(&body).expect("response body should be JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_cookie_reads_back_as_logged_in() {
        let state = test_state().await;
        let cookie = login_cookie(&state);

        let session = state.sessions.read(Some(cookie.value()));
        assert_eq!(session.authenticated_userid(), Some("chuahlearn"));
    }
}
