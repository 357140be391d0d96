//! services/assistant/src/explainer.rs
//!
//! Concept explanations pitched at a chosen difficulty level.

use study_buddy_core::{
    domain::{ChatMessage, DifficultyLevel},
    ports::{ChatCompletionService, CoreError, CoreResult},
};

const EXPLAINER_SYSTEM: &str = r#"You are an expert tutor skilled at explaining complex topics clearly.
Your explanations are accurate, engaging, and tailored to the requested difficulty level.
Use analogies, examples, and structured formatting (headings, bullet points) to maximize understanding.
Always end with a "Key Takeaways" section of 3-5 bullet points."#;

fn user_prompt(topic: &str, level: DifficultyLevel, extra_context: &str) -> String {
    let context_line = if extra_context.is_empty() {
        String::new()
    } else {
        format!("\nAdditional context from the student: {extra_context}")
    };

    format!(
        r#"Explain the following topic at a {level} level:

Topic: {topic}{context_line}

Structure your response with:
1. A brief introduction
2. Core concept explanation with examples
3. Real-world applications
4. Key Takeaways (bullet points)"#,
        level = level.description(),
    )
}

/// Explains `topic` at the given difficulty level, optionally folding in
/// extra context supplied by the student. Returns markdown.
pub async fn explain_concept(
    gateway: &dyn ChatCompletionService,
    topic: &str,
    level: DifficultyLevel,
    extra_context: &str,
) -> CoreResult<String> {
    if topic.trim().is_empty() {
        return Err(CoreError::EmptyInput("Topic"));
    }

    let messages = vec![
        ChatMessage::system(EXPLAINER_SYSTEM),
        ChatMessage::user(user_prompt(topic, level, extra_context)),
    ];

    gateway.complete(&messages, 0.7).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_splices_in_the_level_description() {
        let prompt = user_prompt("Photosynthesis", DifficultyLevel::Eli5, "");
        assert!(prompt.contains("Topic: Photosynthesis"));
        assert!(prompt.contains("relatable analogies a 5-year-old would understand"));
        assert!(!prompt.contains("Additional context"));
    }

    #[test]
    fn prompt_includes_extra_context_when_present() {
        let prompt = user_prompt(
            "Photosynthesis",
            DifficultyLevel::University,
            "focus on the light-dependent reactions",
        );
        assert!(prompt
            .contains("Additional context from the student: focus on the light-dependent reactions"));
    }
}
