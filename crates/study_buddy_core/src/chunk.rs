//! crates/study_buddy_core/src/chunk.rs
//!
//! Word-based document chunking with overlap between neighboring chunks.

use crate::ports::{CoreError, CoreResult};

/// Word-window parameters for splitting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    pub max_words: usize,
    pub overlap_words: usize,
}

/// Window used by the summarization pipeline for over-threshold documents.
pub const SUMMARIZER_CHUNKING: ChunkConfig = ChunkConfig { max_words: 2500, overlap_words: 150 };

/// Default window for splitting freshly ingested documents.
pub const INGEST_CHUNKING: ChunkConfig = ChunkConfig { max_words: 3000, overlap_words: 200 };

/// Splits `text` into whitespace-delimited word windows.
///
/// Each window holds up to `max_words` words and starts
/// `max_words - overlap_words` words after the previous one, so neighboring
/// windows share `overlap_words` words of context. Trailing windows may be
/// shorter. Empty or whitespace-only input produces no chunks.
pub fn chunk_words(text: &str, config: ChunkConfig) -> CoreResult<Vec<String>> {
    if config.overlap_words >= config.max_words {
        return Err(CoreError::InvalidChunkConfig {
            max_words: config.max_words,
            overlap_words: config.overlap_words,
        });
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let step = config.max_words - config.overlap_words;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = usize::min(start + config.max_words, words.len());
        chunks.push(words[start..end].join(" "));
        start += step;
    }

    Ok(chunks)
}
