use actix_multipart::{Field, Multipart};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use futures::TryStreamExt;

use crate::{
    app_state::AppState,
    auth::CurrentSession,
    errors::{AppError, AppResult},
    handlers::credential_scope,
    services::{outline_upload::OutlineUpload, NewCourse},
};

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

async fn read_text_field(field: &mut Field) -> AppResult<String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if bytes.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(AppError::PayloadTooLarge("Form field too large".to_string()));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn read_outline_field(field: &mut Field) -> AppResult<Option<OutlineUpload>> {
    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_string)
        .filter(|name| !name.is_empty());

    let Some(filename) = filename else {
        while field.try_next().await?.is_some() {}
        return Ok(None);
    };

    let mut upload = OutlineUpload {
        filename,
        bytes: Vec::new(),
    };
    while let Some(chunk) = field.try_next().await? {
        upload.push_chunk(&chunk)?;
    }
    Ok(Some(upload))
}

async fn read_course_form(mut payload: Multipart) -> AppResult<NewCourse> {
    let mut request = NewCourse::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => request.name = read_text_field(&mut field).await?,
            "description" => request.description = read_text_field(&mut field).await?,
            "outline" => request.outline = read_outline_field(&mut field).await?,
            _ => {
                while field.try_next().await?.is_some() {}
            }
        }
    }
    Ok(request)
}

#[post("/api/courses")]
async fn create_course(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let request = read_course_form(payload).await?;
    let course = state.course_service.create(request).await?;
    Ok(HttpResponse::Created().json(course))
}

#[post("/api/courses/{id}/generate-structure")]
async fn generate_structure(
    state: web::Data<AppState>,
    id: web::Path<String>,
    req: HttpRequest,
    session: CurrentSession,
) -> Result<HttpResponse, AppError> {
    let scope = credential_scope(&req, session);
    let course = state.course_service.generate_structure(&id, &scope).await?;
    Ok(HttpResponse::Ok().json(course))
}

#[get("/api/courses/{id}")]
async fn get_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course = state.course_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(course))
}

#[get("/api/courses")]
async fn list_courses(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let courses = state.course_service.list().await?;
    Ok(HttpResponse::Ok().json(courses))
}
