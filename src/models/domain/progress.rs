use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

pub const DEFAULT_STATUS: &str = "not-started";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Progress {
    pub topic_id: String,
    pub status: String,   // Free-form, "not-started" / "in-progress" / "completed" by convention
    pub progress: Number, // Percent, passed through exactly as supplied
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    pub fn new(topic_id: &str, status: Option<String>, progress: Option<Number>) -> Self {
        Progress {
            topic_id: topic_id.to_string(),
            status: status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            progress: progress.unwrap_or_else(|| Number::from(0)),
            updated_at: Utc::now(),
        }
    }
}
