use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{check_credentials, CurrentSession},
    errors::AppError,
    models::dto::{
        request::LoginRequest,
        response::{CheckAuthResponse, LoginResponse},
    },
};

#[post("/api/login")]
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
    session: CurrentSession,
) -> Result<HttpResponse, AppError> {
    let userid = request.userid.trim();

    if !check_credentials(userid, &request.password) {
        log::info!("Rejected login for {:?}", userid);
        return Ok(HttpResponse::Unauthorized().json(LoginResponse {
            success: false,
            message: None,
            userid: None,
            error: Some("Invalid user ID or password".to_string()),
        }));
    }

    let mut session = session.0;
    session.login(userid);
    let cookie = state.sessions.issue_cookie(&session)?;
    log::info!("User {} logged in", userid);

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        success: true,
        message: Some("Login successful".to_string()),
        userid: Some(userid.to_string()),
        error: None,
    }))
}

#[post("/api/logout")]
async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.sessions.removal_cookie())
        .json(serde_json::json!({
            "success": true,
            "message": "Logged out successfully"
        }))
}

#[get("/api/check-auth")]
async fn check_auth(session: CurrentSession) -> HttpResponse {
    let userid = session.0.authenticated_userid().map(str::to_string);
    HttpResponse::Ok().json(CheckAuthResponse {
        authenticated: userid.is_some(),
        userid,
    })
}
