//! services/assistant/src/summarizer.rs
//!
//! Map-reduce summarization of study notes. Short documents go to the model
//! in one call; long documents are chunked, summarized chunk by chunk, and
//! merged in a final call.

use study_buddy_core::{
    chunk::{chunk_words, SUMMARIZER_CHUNKING},
    domain::{ChatMessage, SummaryStyle},
    ports::{ChatCompletionService, CoreError, CoreResult},
};
use tracing::debug;

/// Documents at or under this many words are summarized in a single call.
pub const CHUNK_THRESHOLD_WORDS: usize = 2500;

const SUMMARIZER_SYSTEM: &str = r#"You are an expert academic assistant that creates clear, concise summaries.
You identify the most important concepts, definitions, and relationships in study material.
Your summaries are structured, scannable, and study-friendly."#;

fn style_instruction(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Structured => {
            "a structured summary with headings, bullet points for key ideas, and a brief conclusion"
        }
        SummaryStyle::Concise => {
            "a concise paragraph summary (max 150 words) highlighting only the most critical points"
        }
        SummaryStyle::Detailed => {
            "a detailed summary preserving all important details, organized by topic/section"
        }
    }
}

fn user_prompt(notes: &str, style: SummaryStyle) -> String {
    format!(
        r#"Summarize the following study material as {instruction}.

STUDY MATERIAL:
{notes}

Also include at the end:
- **Important Terms**: List any key terms/definitions found
- **Study Tips**: 2-3 tips for mastering this material"#,
        instruction = style_instruction(style),
    )
}

fn chunk_prompt(chunk: &str, chunk_num: usize, total: usize) -> String {
    format!(
        r#"Summarize the key points from this section (part {chunk_num} of {total}) of a study document.
Be concise. Focus on facts, definitions, and concepts.

SECTION:
{chunk}"#
    )
}

fn merge_prompt(partial_summaries: &[String]) -> String {
    let combined = partial_summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| format!("Section {} Summary:\n{}", i + 1, summary))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        r#"You have been given summaries of different sections of a study document.
Create a single, unified, well-structured final summary from these section summaries.

{combined}

Final summary should include:
- Main topics covered
- Key concepts and definitions
- Important Terms glossary
- Study Tips"#
    )
}

/// Summarizes study notes in the requested style.
///
/// Documents over [`CHUNK_THRESHOLD_WORDS`] words are split with the
/// summarizer window, each chunk is summarized in order, and a final call
/// merges the partial summaries. Any failed call aborts the whole pipeline.
pub async fn summarize_notes(
    gateway: &dyn ChatCompletionService,
    notes: &str,
    style: SummaryStyle,
) -> CoreResult<String> {
    if notes.trim().is_empty() {
        return Err(CoreError::EmptyInput("Notes"));
    }

    let words = word_count(notes);

    // Short document: single API call.
    if words <= CHUNK_THRESHOLD_WORDS {
        let messages = vec![
            ChatMessage::system(SUMMARIZER_SYSTEM),
            ChatMessage::user(user_prompt(notes, style)),
        ];
        return gateway.complete(&messages, 0.4).await;
    }

    // Long document: chunk, summarize each section, then merge.
    let chunks = chunk_words(notes, SUMMARIZER_CHUNKING)?;
    let total = chunks.len();
    debug!(words, chunks = total, "summarizing long document in sections");

    let mut partial_summaries = Vec::with_capacity(total);
    for (i, chunk) in chunks.iter().enumerate() {
        let messages = vec![
            ChatMessage::system(SUMMARIZER_SYSTEM),
            ChatMessage::user(chunk_prompt(chunk, i + 1, total)),
        ];
        partial_summaries.push(gateway.complete(&messages, 0.3).await?);
    }

    let merge_messages = vec![
        ChatMessage::system(SUMMARIZER_SYSTEM),
        ChatMessage::user(merge_prompt(&partial_summaries)),
    ];
    gateway.complete(&merge_messages, 0.4).await
}

/// Approximate word count of a string, as shown in the notes editor.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
