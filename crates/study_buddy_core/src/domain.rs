//! crates/study_buddy_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any model backend or presentation layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ports::{CoreError, CoreResult};

/// Role of a single message in a model conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message exchanged with the model backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// How a summary should be organized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    Structured,
    Concise,
    Detailed,
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            SummaryStyle::Structured => "structured",
            SummaryStyle::Concise => "concise",
            SummaryStyle::Detailed => "detailed",
        };
        write!(f, "{token}")
    }
}

/// The question format a quiz uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizKind {
    MultipleChoice,
    TrueFalse,
}

impl QuizKind {
    /// The label used for this format inside generation prompts.
    pub fn label(&self) -> &'static str {
        match self {
            QuizKind::MultipleChoice => "MCQ",
            QuizKind::TrueFalse => "True/False",
        }
    }
}

impl std::fmt::Display for QuizKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Target audience for a concept explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Eli5,
    MiddleSchool,
    HighSchool,
    University,
}

impl DifficultyLevel {
    /// The audience description spliced into the explainer prompt.
    pub fn description(&self) -> &'static str {
        match self {
            DifficultyLevel::Eli5 => {
                "ELI5 - use very simple words and relatable analogies a 5-year-old would understand"
            }
            DifficultyLevel::MiddleSchool => {
                "middle school level - assume basic knowledge, use simple vocabulary and everyday examples"
            }
            DifficultyLevel::HighSchool => {
                "high school level - include relevant terminology and slightly technical explanations"
            }
            DifficultyLevel::University => {
                "university/advanced level - use proper technical terminology, depth, and academic rigor"
            }
        }
    }
}

/// One generated quiz question. `options` is present for multiple-choice
/// questions and absent for true/false ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Option<Vec<String>>,
    pub answer: String,
    pub explanation: String,
}

impl QuizQuestion {
    /// Rebuilds a question from one element of the model's JSON array.
    ///
    /// Missing keys default to empty strings so downstream code can rely on
    /// every field being present. When options are listed, the answer must
    /// be one of them.
    pub fn from_value(value: &Value) -> CoreResult<Self> {
        let record = value.as_object().ok_or_else(|| {
            CoreError::SchemaViolation("quiz question is not a JSON object".to_string())
        })?;

        let question = string_field(record, "question");
        let answer = string_field(record, "answer");
        let explanation = string_field(record, "explanation");
        let options = record.get("options").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .map(|item| item.as_str().unwrap_or_default().to_string())
                .collect::<Vec<_>>()
        });

        if let Some(listed) = &options {
            if !listed.iter().any(|option| option == &answer) {
                return Err(CoreError::SchemaViolation(format!(
                    "answer {answer:?} is not one of the listed options"
                )));
            }
        }

        Ok(Self { question, options, answer, explanation })
    }
}

/// One generated flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    pub category: String,
}

impl Flashcard {
    /// Rebuilds a flashcard from one element of the model's JSON array,
    /// defaulting the category to "General" when the model omits it.
    pub fn from_value(value: &Value) -> CoreResult<Self> {
        let record = value.as_object().ok_or_else(|| {
            CoreError::SchemaViolation("flashcard is not a JSON object".to_string())
        })?;

        Ok(Self {
            front: string_field(record, "front"),
            back: string_field(record, "back"),
            category: record
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or("General")
                .to_string(),
        })
    }
}

// Per-question outcome inside a score report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerReview {
    pub question: String,
    pub correct: bool,
    pub correct_answer: String,
    pub your_answer: String,
    pub explanation: String,
}

/// The result of scoring a completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub results: Vec<AnswerReview>,
}

fn string_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quiz_question_defaults_missing_keys() {
        let value = json!({"question": "What is 2 + 2?"});
        let question = QuizQuestion::from_value(&value).unwrap();
        assert_eq!(question.question, "What is 2 + 2?");
        assert_eq!(question.answer, "");
        assert_eq!(question.explanation, "");
        assert!(question.options.is_none());
    }

    #[test]
    fn quiz_question_keeps_listed_options() {
        let value = json!({
            "question": "Pick A",
            "options": ["A) yes", "B) no"],
            "answer": "A) yes",
            "explanation": "A is first."
        });
        let question = QuizQuestion::from_value(&value).unwrap();
        assert_eq!(
            question.options.as_deref(),
            Some(&["A) yes".to_string(), "B) no".to_string()][..])
        );
        assert_eq!(question.answer, "A) yes");
    }

    #[test]
    fn quiz_question_rejects_answer_outside_options() {
        let value = json!({
            "question": "Pick A",
            "options": ["A) yes", "B) no"],
            "answer": "C) maybe",
            "explanation": ""
        });
        let err = QuizQuestion::from_value(&value).unwrap_err();
        assert!(matches!(err, CoreError::SchemaViolation(_)));
    }

    #[test]
    fn quiz_question_rejects_non_object_element() {
        let err = QuizQuestion::from_value(&json!("just a string")).unwrap_err();
        assert!(matches!(err, CoreError::SchemaViolation(_)));
    }

    #[test]
    fn flashcard_defaults_category_to_general() {
        let card =
            Flashcard::from_value(&json!({"front": "ATP", "back": "Energy carrier"})).unwrap();
        assert_eq!(card.category, "General");
    }

    #[test]
    fn flashcard_keeps_explicit_category() {
        let card = Flashcard::from_value(&json!({
            "front": "ATP",
            "back": "Energy carrier",
            "category": "Biology"
        }))
        .unwrap();
        assert_eq!(card.category, "Biology");
    }
}
