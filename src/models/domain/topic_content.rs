use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Generated material for one topic, overwritten wholesale on regeneration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopicContent {
    pub lecture: String,
    pub tutorial: String,
    pub practical: String,
    pub quiz: Quiz,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct Quiz {
    #[validate(length(min = 1), nested)]
    pub questions: Vec<QuizQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>, // Anything else the quiz creator returned, kept verbatim
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct QuizQuestion {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(equal = 4))]
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    #[validate(range(max = 3))]
    pub correct_answer: u8, // zero-based index into options
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quiz {
    /// Single-question quiz used when the quiz creator's output is unusable.
    pub fn fallback(topic_name: &str) -> Self {
        Quiz {
            questions: vec![QuizQuestion {
                question: format!("What is the main concept of {}?", topic_name),
                options: ["Option A", "Option B", "Option C", "Option D"]
                    .iter()
                    .map(|o| o.to_string())
                    .collect(),
                correct_answer: 0,
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_quiz_mentions_topic_and_validates() {
        let quiz = Quiz::fallback("Ownership");

        assert_eq!(quiz.questions.len(), 1);
        assert!(quiz.questions[0].question.contains("Ownership"));
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn quiz_question_uses_camel_case_answer_field() {
        let json = serde_json::json!({
            "question": "Q?",
            "options": ["a", "b", "c", "d"],
            "correctAnswer": 2
        });
        let question: QuizQuestion = serde_json::from_value(json).unwrap();

        assert_eq!(question.correct_answer, 2);
        assert_eq!(
            serde_json::to_value(&question).unwrap()["correctAnswer"],
            serde_json::json!(2)
        );
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let json = serde_json::json!({
            "title": "Borrowing check",
            "questions": [{
                "question": "Q?",
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 1,
                "explanation": "because"
            }]
        });
        let quiz: Quiz = serde_json::from_value(json.clone()).unwrap();

        assert_eq!(quiz.questions[0].extra["explanation"], "because");
        assert_eq!(serde_json::to_value(&quiz).unwrap(), json);
    }

    #[test]
    fn quiz_with_three_options_is_invalid() {
        let quiz = Quiz {
            questions: vec![QuizQuestion {
                question: "Q?".to_string(),
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_answer: 0,
                extra: Map::new(),
            }],
            extra: Map::new(),
        };

        assert!(quiz.validate().is_err());
    }

    #[test]
    fn quiz_with_out_of_range_answer_is_invalid() {
        let mut quiz = Quiz::fallback("x");
        quiz.questions[0].correct_answer = 4;

        assert!(quiz.validate().is_err());
    }

    #[test]
    fn empty_quiz_is_invalid() {
        let quiz = Quiz {
            questions: vec![],
            extra: Map::new(),
        };
        assert!(quiz.validate().is_err());
    }
}
