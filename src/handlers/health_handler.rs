use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, models::dto::response::HealthResponse};

#[get("/api/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        cors_origins: state.config.allowed_origins(),
        frontend_url: state.config.frontend_url.clone(),
        storage: state.storage_backend.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_helpers::json_body, test_state};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let json = json_body(resp).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["storage"], "memory");
        assert!(json["cors_origins"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("http://localhost:5173")));
    }
}
