use actix_web::cookie::{time, Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::session::{SessionClaims, SessionData},
    errors::{AppError, AppResult},
};

pub const SESSION_COOKIE: &str = "session";

/// Issues and reads the signed session cookie.
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_hours: i64,
    secure_cookie: bool,
}

impl SessionService {
    pub fn new(secret: &SecretString, lifetime_hours: i64, secure_cookie: bool) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            lifetime_hours,
            secure_cookie,
        }
    }

    pub fn create_token(&self, data: &SessionData) -> AppResult<String> {
        let claims = SessionClaims::new(data.clone(), self.lifetime_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to sign session: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<SessionData> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.data)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session: {}", e)))
    }

    /// Expired, tampered or missing cookies all read as a fresh session.
    pub fn read(&self, cookie_value: Option<&str>) -> SessionData {
        match cookie_value {
            Some(token) => self.validate_token(token).unwrap_or_else(|e| {
                log::debug!("Discarding session cookie: {}", e);
                SessionData::default()
            }),
            None => SessionData::default(),
        }
    }

    pub fn issue_cookie(&self, data: &SessionData) -> AppResult<Cookie<'static>> {
        let token = self.create_token(data)?;
        Ok(self
            .cookie_builder(token)
            .max_age(time::Duration::hours(self.lifetime_hours))
            .finish())
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.cookie_builder(String::new()).finish();
        cookie.make_removal();
        cookie
    }

    fn cookie_builder(&self, value: String) -> actix_web::cookie::CookieBuilder<'static> {
        let same_site = if self.secure_cookie {
            SameSite::None
        } else {
            SameSite::Lax
        };
        Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(same_site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn service() -> SessionService {
        let config = Config::test_config();
        SessionService::new(&config.session_secret, 1, false)
    }

    #[test]
    fn test_session_create_and_validate() {
        let service = service();
        let mut data = SessionData::default();
        data.login("chuahlearn");
        data.openai_api_key = Some("sk-test".to_string());

        let token = service.create_token(&data).unwrap();
        let decoded = service.validate_token(&token).unwrap();

        assert_eq!(decoded, data);
    }

    #[test]
    fn test_session_signed_with_other_secret_is_rejected() {
        let other = SessionService::new(&SecretString::from("another-secret".to_string()), 1, false);
        let mut data = SessionData::default();
        data.login("chuahlearn");
        let token = other.create_token(&data).unwrap();

        assert!(service().validate_token(&token).is_err());
        assert_eq!(service().read(Some(&token)), SessionData::default());
    }

    #[test]
    fn test_expired_session_reads_as_empty() {
        let expired = SessionService::new(&Config::test_config().session_secret, -2, false);
        let mut data = SessionData::default();
        data.login("chuahlearn");
        let token = expired.create_token(&data).unwrap();

        assert!(!service().read(Some(&token)).logged_in);
    }

    #[test]
    fn test_cookie_is_http_only() {
        let cookie = service().issue_cookie(&SessionData::default()).unwrap();

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_secure_cookie_allows_cross_site() {
        let secure = SessionService::new(&Config::test_config().session_secret, 1, true);
        let cookie = secure.issue_cookie(&SessionData::default()).unwrap();

        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }
}
