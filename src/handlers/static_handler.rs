use std::path::{Component, Path, PathBuf};

use actix_web::{get, http::header, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError};

const LOGIN_PAGE: &str = "login.html";

/// Maps a request path onto the frontend directory. Anything that could
/// climb out of it is refused.
fn resolve(frontend_dir: &str, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested);
    let safe = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    (safe && !requested.is_empty()).then(|| Path::new(frontend_dir).join(relative))
}

async fn send_file(frontend_dir: &str, requested: &str) -> Result<HttpResponse, AppError> {
    let not_found = || AppError::NotFound("File not found".to_string());
    let path = resolve(frontend_dir, requested).ok_or_else(not_found)?;

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            Ok(HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, mime.as_ref()))
                .body(bytes))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            Err(not_found())
        }
    }
}

#[get("/")]
async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send_file(&state.config.frontend_dir, LOGIN_PAGE).await
}

#[get("/login.html")]
async fn login_page(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    send_file(&state.config.frontend_dir, LOGIN_PAGE).await
}

#[get("/{path:.*}")]
async fn serve_static(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    send_file(&state.config.frontend_dir, &path).await
}
