//! services/assistant/src/quiz.rs
//!
//! Quiz generation: prompts the model for a JSON array of questions and
//! normalizes the reply into `QuizQuestion` records.

use study_buddy_core::{
    domain::{ChatMessage, QuizKind, QuizQuestion},
    parse::parse_json_array,
    ports::{ChatCompletionService, CoreError, CoreResult},
};
use tracing::debug;

const QUIZ_SYSTEM: &str = r#"You are an expert educator who creates high-quality assessment questions.
You MUST return ONLY valid JSON - no explanations, no markdown fences, no extra text.
The JSON must exactly match the requested format."#;

const MCQ_FORMAT: &str = r#"[
  {
    "question": "What is ...?",
    "options": ["A) ...", "B) ...", "C) ...", "D) ..."],
    "answer": "A) ...",
    "explanation": "Brief explanation of why this is correct."
  }
]"#;

const TRUE_FALSE_FORMAT: &str = r#"[
  {
    "question": "Statement about the topic...",
    "answer": "True",
    "explanation": "Brief explanation."
  }
]"#;

fn user_prompt(source: &str, num_questions: usize, kind: QuizKind) -> String {
    let format_desc = match kind {
        QuizKind::MultipleChoice => MCQ_FORMAT,
        QuizKind::TrueFalse => TRUE_FALSE_FORMAT,
    };

    format!(
        r#"Generate exactly {num_questions} {kind} questions based on the following content.

CONTENT:
{source}

Return ONLY a JSON array in this exact format:
{format_desc}

Rules:
- Questions must be clear and unambiguous
- For MCQ, make all 4 options plausible
- Cover different aspects of the content
- Return ONLY the JSON array, nothing else"#
    )
}

/// Generates a quiz from a topic name or pasted study notes.
///
/// The question count is clamped to 1..=20. The reply must be a JSON array;
/// it is normalized into [`QuizQuestion`] records and any malformed record
/// fails the whole generation.
pub async fn generate_quiz(
    gateway: &dyn ChatCompletionService,
    source: &str,
    num_questions: usize,
    kind: QuizKind,
) -> CoreResult<Vec<QuizQuestion>> {
    if source.trim().is_empty() {
        return Err(CoreError::EmptyInput("Topic or notes"));
    }

    let num_questions = num_questions.clamp(1, 20);
    let messages = vec![
        ChatMessage::system(QUIZ_SYSTEM),
        ChatMessage::user(user_prompt(source, num_questions, kind)),
    ];

    let raw = gateway.complete(&messages, 0.6).await?;
    let values = parse_json_array(&raw)?;
    debug!(questions = values.len(), kind = kind.label(), "parsed quiz reply");

    values.iter().map(QuizQuestion::from_value).collect()
}
