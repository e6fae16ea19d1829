use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub id: String,          // Server generated, set on create
    pub name: String,        // Set on create
    pub description: String, // Set on create, may be empty
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub modules: Vec<CourseModule>, // Replaced wholesale by structure generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_file: Option<String>, // Stored upload path, if an outline was supplied
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CourseModule {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<ModuleTopic>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModuleTopic {
    pub name: String,
}

/// Shape the structure designer agent is asked to return.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CourseStructure {
    #[serde(default)]
    pub modules: Vec<CourseModule>,
}

impl Course {
    pub fn new(name: &str, description: &str) -> Self {
        Course {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            modules: Vec::new(),
            outline_file: None,
        }
    }
}

impl CourseModule {
    pub fn new(name: &str, topics: &[&str]) -> Self {
        CourseModule {
            name: name.to_string(),
            topics: topics
                .iter()
                .map(|t| ModuleTopic {
                    name: t.to_string(),
                })
                .collect(),
        }
    }
}

impl CourseStructure {
    /// Used whenever the structure designer's output cannot be used.
    pub fn fallback() -> Self {
        CourseStructure {
            modules: vec![
                CourseModule::new("Introduction", &["Getting Started", "Overview"]),
                CourseModule::new("Core Concepts", &["Fundamentals", "Advanced Topics"]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_course_has_unique_id_and_no_modules() {
        let a = Course::new("Rust", "Systems programming");
        let b = Course::new("Rust", "Systems programming");

        assert_ne!(a.id, b.id);
        assert!(a.modules.is_empty());
        assert!(a.outline_file.is_none());
    }

    #[test]
    fn fallback_structure_has_two_modules_with_topics() {
        let structure = CourseStructure::fallback();

        assert_eq!(structure.modules.len(), 2);
        assert_eq!(structure.modules[0].name, "Introduction");
        assert!(structure.modules.iter().all(|m| m.topics.len() == 2));
    }

    #[test]
    fn course_without_outline_omits_field() {
        let course = Course::new("Rust", "");
        let json = serde_json::to_value(&course).unwrap();

        assert!(json.get("outline_file").is_none());
        assert_eq!(json["modules"], serde_json::json!([]));
    }
}
