use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::models::domain::{Quiz, QuizQuestion};

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```(?i:json)?\s*(.*?)\s*```$").expect("fenced block pattern is valid")
});

static OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?i:json)?").expect("opening fence pattern is valid"));

/// Outcome of reading structured data out of model text.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    Parsed(T),
    Fallback(String), // Why the text could not be used
}

impl<T> Extraction<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Extraction::Parsed(_))
    }

    /// Returns the parsed value, or builds the substitute and logs the reason.
    pub fn or_fallback(self, what: &str, fallback: impl FnOnce() -> T) -> T {
        match self {
            Extraction::Parsed(value) => value,
            Extraction::Fallback(reason) => {
                log::warn!("Using default {}: {}", what, reason);
                fallback()
            }
        }
    }
}

/// Removes a surrounding triple-backtick fence, with or without a json tag.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(inner) = FENCED_BLOCK.captures(trimmed).and_then(|c| c.get(1)) {
        return inner.as_str();
    }
    // Truncated output may open a fence and never close it.
    match OPENING_FENCE.find(trimmed) {
        Some(fence) => trimmed[fence.end()..].trim(),
        None => trimmed,
    }
}

pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Extraction<T> {
    match serde_json::from_str(strip_code_fence(raw)) {
        Ok(value) => Extraction::Parsed(value),
        Err(e) => Extraction::Fallback(format!("invalid JSON: {}", e)),
    }
}

/// Reads a quiz object. Well-formed questions are kept, malformed ones are
/// dropped, and every other field passes through untouched. Falls back only
/// when nothing usable is left.
pub fn extract_quiz(raw: &str) -> Extraction<Quiz> {
    let mut extra = match extract_json::<Value>(raw) {
        Extraction::Parsed(Value::Object(object)) => object,
        Extraction::Parsed(_) => return Extraction::Fallback("quiz is not a JSON object".into()),
        Extraction::Fallback(reason) => return Extraction::Fallback(reason),
    };
    let Some(Value::Array(items)) = extra.remove("questions") else {
        return Extraction::Fallback("no questions array".into());
    };

    let total = items.len();
    let questions: Vec<QuizQuestion> = items
        .into_iter()
        .filter_map(|item| {
            let question: QuizQuestion = serde_json::from_value(item).ok()?;
            question.validate().ok().map(|_| question)
        })
        .collect();

    if questions.is_empty() {
        return Extraction::Fallback(format!("none of {} questions usable", total));
    }
    if questions.len() < total {
        log::warn!(
            "Dropped {} malformed quiz question(s) of {}",
            total - questions.len(),
            total
        );
    }
    Extraction::Parsed(Quiz { questions, extra })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::CourseStructure;

    const QUIZ_JSON: &str = r#"{"questions":[{"question":"What is a borrow?","options":["a","b","c","d"],"correctAnswer":1}]}"#;

    #[test]
    fn strips_tagged_and_untagged_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```JSON {\"a\":1}```  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn fenced_quiz_parses_to_embedded_object() {
        let raw = format!("```json {}```", QUIZ_JSON);
        let expected: Quiz = serde_json::from_str(QUIZ_JSON).unwrap();

        assert_eq!(extract_quiz(&raw), Extraction::Parsed(expected));
    }

    #[test]
    fn quiz_keeps_fields_it_does_not_model() {
        let raw = r#"```json
{"difficulty":"easy","questions":[{"question":"Q","options":["a","b","c","d"],"correctAnswer":1,"explanation":"because"}]}
```"#;

        let quiz = extract_quiz(raw).or_fallback("quiz", || Quiz::fallback("x"));

        let embedded: serde_json::Value = serde_json::from_str(strip_code_fence(raw)).unwrap();
        assert_eq!(serde_json::to_value(&quiz).unwrap(), embedded);
    }

    #[test]
    fn malformed_questions_are_dropped_not_the_whole_quiz() {
        let raw = r#"{"questions":[
            {"question":"Good","options":["a","b","c","d"],"correctAnswer":2},
            {"question":"Five options","options":["a","b","c","d","e"],"correctAnswer":0},
            {"question":"Bad index","options":["a","b","c","d"],"correctAnswer":7}
        ]}"#;

        let Extraction::Parsed(quiz) = extract_quiz(raw) else {
            panic!("quiz with one good question should parse");
        };
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].question, "Good");
    }

    #[test]
    fn quiz_without_usable_questions_falls_back() {
        for raw in [
            r#"{"questions":[{"question":"Q","options":["a","b"],"correctAnswer":0}]}"#,
            r#"{"questions":[]}"#,
            r#"{"items":[]}"#,
            r#"[1, 2, 3]"#,
            "Sorry, here are some questions...",
        ] {
            assert!(!extract_quiz(raw).is_parsed(), "{} should fall back", raw);
        }
    }

    #[test]
    fn prose_falls_back() {
        let result = extract_json::<CourseStructure>("Here is your course structure!");

        assert!(!result.is_parsed());
        let structure = result.or_fallback("structure", CourseStructure::fallback);
        assert_eq!(structure, CourseStructure::fallback());
    }
}
