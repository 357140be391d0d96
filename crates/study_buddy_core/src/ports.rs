//! crates/study_buddy_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like model backends.

use async_trait::async_trait;

use crate::domain::ChatMessage;

//=========================================================================================
// Core Error and Result Types
//=========================================================================================

/// The error type shared by the core algorithms and the gateway port.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required text input was blank.
    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),
    /// Chunking parameters that would never terminate or divide by zero.
    #[error("overlap_words ({overlap_words}) must be smaller than max_words ({max_words})")]
    InvalidChunkConfig { max_words: usize, overlap_words: usize },
    /// The model backend failed or returned an empty reply.
    #[error("model backend request failed: {0}")]
    UpstreamGeneration(String),
    /// No JSON array could be recovered; carries the raw reply for diagnostics.
    #[error("could not parse a JSON array from the model response.\nRaw response:\n{0}")]
    UnparsableResponse(String),
    /// The reply parsed, but its shape does not match the expected records.
    #[error("model response has the wrong shape: {0}")]
    SchemaViolation(String),
}

/// A convenience type alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The single seam to the model backend.
///
/// One invocation means one network call: no caching, no retries. Callers
/// own prompt assembly and pick the sampling temperature per feature.
#[async_trait]
pub trait ChatCompletionService: Send + Sync {
    /// Sends the conversation to the model and returns the reply text, trimmed.
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> CoreResult<String>;
}
