//! services/assistant/src/error.rs
//!
//! Defines the primary error type for the entire assistant service.

use study_buddy_core::ports::CoreError;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::extract::ExtractError;

/// The primary error type for the `assistant` service.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the core algorithms or
    /// the model gateway.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// Represents a failure to pull text out of an uploaded document.
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Represents a failure while writing an export file.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Represents a standard Input/Output error (e.g., writing an export to disk).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
