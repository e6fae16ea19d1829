use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Everything the server keeps per browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
}

impl SessionData {
    pub fn login(&mut self, userid: &str) {
        self.logged_in = true;
        self.userid = Some(userid.to_string());
    }

    pub fn authenticated_userid(&self) -> Option<&str> {
        if self.logged_in {
            self.userid.as_deref()
        } else {
            None
        }
    }

    pub fn clear_api_keys(&mut self) {
        self.api_provider = None;
        self.openai_api_key = None;
        self.gemini_api_key = None;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub data: SessionData,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl SessionClaims {
    pub fn new(data: SessionData, lifetime_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(lifetime_hours);

        Self {
            data,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
