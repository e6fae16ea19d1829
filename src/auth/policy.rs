use actix_web::http::Method;

pub const VALID_USERID: &str = "chuahlearn";
const VALID_PASSWORD: &str = "chuahchuah";

/// The single shared credential pair.
pub fn check_credentials(userid: &str, password: &str) -> bool {
    userid == VALID_USERID && password == VALID_PASSWORD
}

/// Routes reachable without an authenticated session.
const PUBLIC_API_ROUTES: [(Method, &str); 4] = [
    (Method::POST, "/api/courses"),
    (Method::GET, "/api/health"),
    (Method::POST, "/api/login"),
    (Method::GET, "/api/check-auth"),
];

/// Whether a request must carry an authenticated session before dispatch.
/// Preflights and static assets are always public.
pub fn requires_login(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS {
        return false;
    }
    if path != "/api" && !path.starts_with("/api/") {
        return false;
    }
    !PUBLIC_API_ROUTES
        .iter()
        .any(|(public_method, public_path)| public_method == method && *public_path == path)
}
