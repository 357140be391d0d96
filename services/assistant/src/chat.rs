//! services/assistant/src/chat.rs
//!
//! Conversational tutoring over the student's own study material.

use study_buddy_core::{
    domain::{ChatMessage, ChatRole},
    ports::{ChatCompletionService, CoreResult},
};

const CHAT_SYSTEM: &str = r#"You are a friendly, knowledgeable AI study tutor.
Your goal is to help students understand their study material.
- Answer questions clearly with examples when helpful
- If a student seems confused, try a different explanation approach
- Encourage curiosity and deeper thinking
- Keep responses focused and educational
- Use formatting (bold, bullet points) to improve readability
- If you don't know something, say so honestly"#;

/// At most this much study material is injected into the system prompt.
const CONTEXT_CHAR_LIMIT: usize = 3000;

/// Only the most recent messages are sent to the model.
const HISTORY_LIMIT: usize = 20;

/// Produces the tutor's next reply.
///
/// `history` should already be trimmed with [`trim_history`]; it is sent
/// as-is between the system prompt and the new user message. Non-blank
/// `study_context` is injected into the system prompt, truncated to its
/// first 3000 characters.
pub async fn tutor_reply(
    gateway: &dyn ChatCompletionService,
    history: &[ChatMessage],
    user_message: &str,
    study_context: &str,
) -> CoreResult<String> {
    let mut system_prompt = CHAT_SYSTEM.to_string();
    if !study_context.trim().is_empty() {
        let snippet: String = study_context.chars().take(CONTEXT_CHAR_LIMIT).collect();
        system_prompt.push_str(&format!(
            "\n\nThe student has provided the following study material for context:\n\n{snippet}"
        ));
    }

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(user_message));

    gateway.complete(&messages, 0.7).await
}

/// Filters a raw message log down to what the model should see: user and
/// assistant turns only, keeping the last 20 messages (10 turns).
pub fn trim_history(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let filtered: Vec<ChatMessage> = messages
        .iter()
        .filter(|m| matches!(m.role, ChatRole::User | ChatRole::Assistant))
        .cloned()
        .collect();

    let keep_from = filtered.len().saturating_sub(HISTORY_LIMIT);
    filtered[keep_from..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_history_drops_system_messages() {
        let log = vec![
            ChatMessage::system("setup"),
            ChatMessage::user("q1"),
            ChatMessage::assistant("a1"),
        ];
        let trimmed = trim_history(&log);
        assert_eq!(trimmed.len(), 2);
        assert!(trimmed.iter().all(|m| m.role != ChatRole::System));
    }

    #[test]
    fn trim_history_keeps_only_the_most_recent_twenty() {
        let mut log = Vec::new();
        for i in 0..15 {
            log.push(ChatMessage::user(format!("q{i}")));
            log.push(ChatMessage::assistant(format!("a{i}")));
        }
        let trimmed = trim_history(&log);
        assert_eq!(trimmed.len(), 20);
        assert_eq!(trimmed.first().unwrap().content, "q5");
        assert_eq!(trimmed.last().unwrap().content, "a14");
    }

    #[test]
    fn trim_history_of_a_short_log_is_identity() {
        let log = vec![ChatMessage::user("hello")];
        assert_eq!(trim_history(&log), log);
    }
}
