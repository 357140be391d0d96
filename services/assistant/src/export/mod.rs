//! services/assistant/src/export/mod.rs
//!
//! Renders study material into downloadable formats.

pub mod csv;
pub mod pdf;
pub mod text;

pub use csv::flashcards_to_csv;
pub use pdf::quiz_to_pdf;
pub use text::{chat_transcript, flashcards_to_text};

/// A failure while rendering an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("CSV buffer error: {0}")]
    CsvBuffer(String),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
