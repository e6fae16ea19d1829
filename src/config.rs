use std::env;
use secrecy::SecretString;

pub const DEFAULT_FRONTEND_URL: &str = "https://chuahlearningapp.netlify.app";

const DEV_ORIGINS: [&str; 5] = [
    "http://localhost:3000",
    "http://localhost:8000",
    "http://localhost:5000",
    "http://127.0.0.1:8000",
    "http://127.0.0.1:5000",
];

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub frontend_url: String,
    pub session_secret: SecretString,
    pub session_lifetime_hours: i64,
    pub session_cookie_secure: bool,
    pub openai_api_key: Option<SecretString>,
    pub gemini_api_key: Option<SecretString>,
    pub openai_model: String,
    pub gemini_model: String,
    pub openai_api_base: Option<String>,
    pub gemini_api_base: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub debug: bool,
    pub upload_dir: String,
    pub frontend_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017/".to_string()),
            mongo_db_name: env::var("DB_NAME").unwrap_or_else(|_| "learning_app".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            session_secret: SecretString::from(
                env::var("SECRET_KEY").unwrap_or_else(|_| random_secret()),
            ),
            session_lifetime_hours: env::var("SESSION_LIFETIME_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            session_cookie_secure: env_flag("SESSION_COOKIE_SECURE"),
            openai_api_key: non_empty_var("OPENAI_API_KEY").map(SecretString::from),
            gemini_api_key: non_empty_var("GEMINI_API_KEY").map(SecretString::from),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
            openai_api_base: non_empty_var("OPENAI_API_BASE"),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            web_server_host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            debug: env::var("APP_ENV").map(|v| v == "development").unwrap_or(false),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            frontend_dir: env::var("FRONTEND_DIR").unwrap_or_else(|_| "../frontend".to_string()),
        }
    }

    /// Origins allowed to make credentialed cross-origin requests, deduplicated.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = DEV_ORIGINS.iter().map(|o| o.to_string()).collect();
        for origin in [DEFAULT_FRONTEND_URL, self.frontend_url.as_str()] {
            if !origin.is_empty() && !origins.iter().any(|o| o == origin) {
                origins.push(origin.to_string());
            }
        }
        origins
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017/".to_string(),
            mongo_db_name: "learning_app_test".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            session_secret: SecretString::from("test_session_secret_key".to_string()),
            session_lifetime_hours: 1,
            session_cookie_secure: false,
            openai_api_key: None,
            gemini_api_key: None,
            openai_model: "gpt-4".to_string(),
            gemini_model: "gemini-pro".to_string(),
            openai_api_base: None,
            gemini_api_base: "http://127.0.0.1:9".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            debug: true,
            upload_dir: std::env::temp_dir()
                .join(format!("coursegen-uploads-{}", uuid::Uuid::new_v4()))
                .to_string_lossy()
                .into_owned(),
            frontend_dir: std::env::temp_dir()
                .join(format!("coursegen-frontend-{}", uuid::Uuid::new_v4()))
                .to_string_lossy()
                .into_owned(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn random_secret() -> String {
    format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
}
