//! services/assistant/src/export/text.rs
//!
//! Plain-text exports for chat transcripts and flashcard decks.

use study_buddy_core::{ChatMessage, ChatRole, Flashcard};

/// Renders a chat history as a readable transcript.
///
/// User turns are labelled `You:` and assistant turns `AI Tutor:`;
/// system messages are internal and skipped.
pub fn chat_transcript(history: &[ChatMessage]) -> String {
    history
        .iter()
        .filter_map(|message| match message.role {
            ChatRole::User => Some(format!("You: {}", message.content)),
            ChatRole::Assistant => Some(format!("AI Tutor: {}", message.content)),
            ChatRole::System => None,
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders a flashcard deck as question/answer pairs.
pub fn flashcards_to_text(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|card| format!("Q: {}\nA: {}", card.front, card.back))
        .collect::<Vec<_>>()
        .join("\n\n")
}
