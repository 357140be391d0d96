//! services/assistant/src/flashcards.rs
//!
//! Flashcard generation: prompts the model for a JSON array of cards and
//! normalizes the reply into `Flashcard` records.

use study_buddy_core::{
    domain::{ChatMessage, Flashcard},
    parse::parse_json_array,
    ports::{ChatCompletionService, CoreError, CoreResult},
};
use tracing::debug;

const FLASHCARD_SYSTEM: &str = r#"You are an expert at creating study flashcards.
You MUST return ONLY valid JSON - no markdown, no extra text.
Create flashcards that are clear, concise, and memorable."#;

fn user_prompt(source: &str, num_cards: usize) -> String {
    format!(
        r#"Create exactly {num_cards} flashcards based on the following content.

CONTENT:
{source}

Return ONLY a JSON array in this exact format:
[
  {{
    "front": "Term or question",
    "back": "Definition or answer",
    "category": "optional category/topic tag"
  }}
]

Rules:
- Front side should be a term, concept, or question
- Back side should be a concise definition or answer (max 2-3 sentences)
- Cover the most important concepts
- Return ONLY the JSON array, nothing else"#
    )
}

/// Generates flashcards from a topic name or pasted study notes.
///
/// The card count is clamped to 1..=30. Cards missing a category are filed
/// under "General".
pub async fn generate_flashcards(
    gateway: &dyn ChatCompletionService,
    source: &str,
    num_cards: usize,
) -> CoreResult<Vec<Flashcard>> {
    if source.trim().is_empty() {
        return Err(CoreError::EmptyInput("Topic or notes"));
    }

    let num_cards = num_cards.clamp(1, 30);
    let messages = vec![
        ChatMessage::system(FLASHCARD_SYSTEM),
        ChatMessage::user(user_prompt(source, num_cards)),
    ];

    let raw = gateway.complete(&messages, 0.6).await?;
    let values = parse_json_array(&raw)?;
    debug!(cards = values.len(), "parsed flashcard reply");

    values.iter().map(Flashcard::from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_asks_for_the_clamped_count() {
        assert!(user_prompt("mitosis", 10).contains("Create exactly 10 flashcards"));
    }

    #[test]
    fn prompt_shows_the_record_shape() {
        let prompt = user_prompt("mitosis", 10);
        assert!(prompt.contains(r#""front": "Term or question""#));
        assert!(prompt.contains(r#""category": "optional category/topic tag""#));
    }
}
