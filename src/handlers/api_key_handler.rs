use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::CurrentSession,
    errors::AppError,
    models::dto::{
        request::{SetAgentApiKeysRequest, SetApiKeysRequest, TestApiKeyRequest},
        response::{AgentKeysResponse, MessageResponse, SetApiKeysResponse, TestApiKeyResponse},
    },
};

#[post("/api/set-api-keys")]
async fn set_api_keys(
    state: web::Data<AppState>,
    request: web::Json<SetApiKeysRequest>,
    session: CurrentSession,
) -> Result<HttpResponse, AppError> {
    let mut session = session.0;
    let provider = state.api_keys.set_session_keys(&mut session, &request)?;
    let cookie = state.sessions.issue_cookie(&session)?;

    Ok(HttpResponse::Ok().cookie(cookie).json(SetApiKeysResponse {
        message: "API keys set successfully".to_string(),
        provider: provider.to_string(),
    }))
}

#[post("/api/test-api-key")]
async fn test_api_key(
    state: web::Data<AppState>,
    request: web::Json<TestApiKeyRequest>,
) -> Result<HttpResponse, AppError> {
    match state.api_keys.test_key(&request).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(AppError::ValidationError(message)) => {
            Ok(HttpResponse::BadRequest().json(TestApiKeyResponse::invalid(message)))
        }
        Err(e) => Err(e),
    }
}

#[post("/api/clear-api-keys")]
async fn clear_api_keys(
    state: web::Data<AppState>,
    session: CurrentSession,
) -> Result<HttpResponse, AppError> {
    let mut session = session.0;
    session.clear_api_keys();
    let cookie = state.sessions.issue_cookie(&session)?;

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageResponse::new("API keys cleared")))
}

#[get("/api/api-key-status")]
async fn api_key_status(state: web::Data<AppState>, session: CurrentSession) -> HttpResponse {
    HttpResponse::Ok().json(state.api_keys.status(&session.0))
}

#[post("/api/set-agent-api-keys")]
async fn set_agent_api_keys(
    state: web::Data<AppState>,
    request: web::Json<SetAgentApiKeysRequest>,
) -> Result<HttpResponse, AppError> {
    let agents = state.agent_keys.set_agent_keys(&request).await?;
    Ok(HttpResponse::Ok().json(AgentKeysResponse {
        message: "Agent API keys saved successfully".to_string(),
        agents,
    }))
}

#[post("/api/clear-agent-api-keys")]
async fn clear_agent_api_keys(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.agent_keys.clear_all().await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("All agent API keys cleared")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        login_cookie, test_helpers::json_body, test_state, test_state_with_factory,
    };
    use crate::services::llm_provider::{MockLlmProvider, MockProviderFactory};
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_set_keys_updates_session_status() {
        let state = test_state().await;
        let cookie = login_cookie(&state);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(set_api_keys)
                .service(api_key_status)
                .service(clear_api_keys),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/set-api-keys")
            .cookie(cookie)
            .set_json(serde_json::json!({ "provider": "gemini", "gemini_api_key": "g-123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("reissued session cookie")
            .into_owned();
        assert_eq!(json_body(resp).await["provider"], "gemini");

        let session = state.sessions.read(Some(updated.value()));
        assert!(session.logged_in);
        assert_eq!(session.gemini_api_key.as_deref(), Some("g-123"));

        let req = test::TestRequest::get()
            .uri("/api/api-key-status")
            .cookie(updated.clone())
            .to_request();
        let status = json_body(test::call_service(&app, req).await).await;
        assert_eq!(status["provider"], "gemini");
        assert_eq!(status["configured"], true);
        assert_eq!(status["openai_configured"], false);

        let req = test::TestRequest::post()
            .uri("/api/clear-api-keys")
            .cookie(updated)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let cleared = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("reissued session cookie")
            .into_owned();
        let session = state.sessions.read(Some(cleared.value()));
        assert!(session.logged_in);
        assert!(session.gemini_api_key.is_none());
    }

    #[actix_web::test]
    async fn test_set_keys_rejects_bad_openai_key() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(set_api_keys),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/set-api-keys")
            .set_json(serde_json::json!({ "provider": "openai", "openai_api_key": "nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "Invalid OpenAI API key format");
    }

    #[actix_web::test]
    async fn test_test_api_key_shapes() {
        let mut factory = MockProviderFactory::new();
        factory.expect_build().returning(|_, _| {
            let mut provider = MockLlmProvider::new();
            provider
                .expect_generate()
                .returning(|_| Ok("pong".to_string()));
            Box::new(provider)
        });
        let state = test_state_with_factory(Arc::new(factory)).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(test_api_key),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/test-api-key")
            .set_json(serde_json::json!({ "provider": "openai" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = json_body(resp).await;
        assert_eq!(json["valid"], false);
        assert_eq!(json["error"], "API key is required");

        let req = test::TestRequest::post()
            .uri("/api/test-api-key")
            .set_json(serde_json::json!({ "provider": "gemini", "api_key": "g-1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["valid"], true);
        assert_eq!(json["message"], "Gemini API key is valid");
    }

    #[actix_web::test]
    async fn test_agent_keys_set_and_clear() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(set_agent_api_keys)
                .service(clear_agent_api_keys),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/set-agent-api-keys")
            .set_json(serde_json::json!({
                "agents": {
                    "quiz": { "provider": "gemini", "apiKey": "g-quiz" },
                    "tutorial": { "provider": "openai", "apiKey": "" }
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["agents"], serde_json::json!(["quiz"]));

        let req = test::TestRequest::post()
            .uri("/api/set-agent-api-keys")
            .set_json(serde_json::json!({
                "agents": { "quiz": { "provider": "mistral", "apiKey": "k" } }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "Invalid provider for agent quiz");

        let req = test::TestRequest::post()
            .uri("/api/clear-agent-api-keys")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(json_body(resp).await["message"], "All agent API keys cleared");
        assert!(state.agent_keys.configured_agents().await.is_empty());
    }
}
