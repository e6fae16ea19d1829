use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, errors::AppError, models::dto::request::UpdateProgressRequest,
};

#[get("/api/progress")]
async fn get_progress(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let progress = state.progress_service.all().await?;
    Ok(HttpResponse::Ok().json(progress))
}

#[post("/api/progress")]
async fn update_progress(
    state: web::Data<AppState>,
    request: web::Json<UpdateProgressRequest>,
) -> Result<HttpResponse, AppError> {
    let progress = state.progress_service.update(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(progress))
}
