pub mod api_key_handler;
pub mod auth_handler;
pub mod course_handler;
pub mod health_handler;
pub mod progress_handler;
pub mod static_handler;
pub mod topic_handler;

use actix_cors::Cors;
use actix_web::{http::header, web, HttpRequest};

use crate::{
    auth::CurrentSession,
    config::Config,
    errors::AppError,
    services::{credentials::CredentialHeaders, CredentialScope},
};

/// Registers every route. Static routes go last so `/{path}` never shadows
/// the API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(course_handler::create_course)
        .service(course_handler::generate_structure)
        .service(course_handler::get_course)
        .service(course_handler::list_courses)
        .service(topic_handler::generate_content)
        .service(topic_handler::get_topic)
        .service(health_handler::health_check)
        .service(auth_handler::login)
        .service(auth_handler::logout)
        .service(auth_handler::check_auth)
        .service(api_key_handler::set_api_keys)
        .service(api_key_handler::test_api_key)
        .service(api_key_handler::clear_api_keys)
        .service(api_key_handler::api_key_status)
        .service(api_key_handler::set_agent_api_keys)
        .service(api_key_handler::clear_agent_api_keys)
        .service(progress_handler::get_progress)
        .service(progress_handler::update_progress)
        .service(static_handler::index)
        .service(static_handler::login_page)
        .service(static_handler::serve_static);
}

/// Credentialed CORS for the configured frontend origins. Preflights are
/// answered here, before the login check runs.
pub fn cors(config: &Config) -> Cors {
    config
        .allowed_origins()
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec![header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}

/// Malformed JSON bodies answer 400 in the usual error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
    })
}

/// Credential inputs for generation calls made on behalf of this request.
pub fn credential_scope(req: &HttpRequest, session: CurrentSession) -> CredentialScope {
    CredentialScope {
        headers: CredentialHeaders::from_headers(req.headers()),
        session: session.0,
    }
}
