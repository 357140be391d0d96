//! services/assistant/src/export/csv.rs
//!
//! CSV export for flashcard decks. The column layout matches what the
//! popular spaced-repetition importers expect: Front, Back, Category.

use study_buddy_core::Flashcard;

use super::ExportError;

/// Renders a flashcard deck as CSV bytes with a header row.
pub fn flashcards_to_csv(cards: &[Flashcard]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(["Front", "Back", "Category"])?;
    for card in cards {
        writer.write_record([&card.front, &card.back, &card.category])?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::CsvBuffer(e.to_string()))
}
