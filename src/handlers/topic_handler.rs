use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::CurrentSession,
    errors::AppError,
    handlers::credential_scope,
    models::dto::request::GenerateTopicContentRequest,
};

#[post("/api/topics/{id}/generate-content")]
async fn generate_content(
    state: web::Data<AppState>,
    topic_id: web::Path<String>,
    request: web::Json<GenerateTopicContentRequest>,
    req: HttpRequest,
    session: CurrentSession,
) -> Result<HttpResponse, AppError> {
    let scope = credential_scope(&req, session);
    let content = state
        .topic_service
        .generate(&topic_id, &request, &scope)
        .await?;
    Ok(HttpResponse::Ok().json(content))
}

#[get("/api/topics/{id}")]
async fn get_topic(
    state: web::Data<AppState>,
    topic_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let content = state.topic_service.get(&topic_id).await?;
    Ok(HttpResponse::Ok().json(content))
}
