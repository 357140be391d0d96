//! services/assistant/src/extract.rs
//!
//! Pulls plain text out of uploaded study documents.
//! Supports: PDF, DOCX, TXT.

use std::io::Read;

use quick_xml::events::Event;
use tracing::warn;
use zip::ZipArchive;

/// A failure while turning an uploaded file into text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}. Please upload PDF, DOCX, or TXT.")]
    UnsupportedFileType(String),
    #[error("Could not extract text from {format}: {reason}")]
    Extraction { format: &'static str, reason: String },
}

/// Extracts text from an uploaded file, dispatching on its extension
/// (case-insensitive).
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let name = file_name.to_lowercase();
    if name.ends_with(".pdf") {
        extract_pdf(bytes)
    } else if name.ends_with(".docx") {
        extract_docx(bytes)
    } else if name.ends_with(".txt") {
        Ok(decode_txt(bytes))
    } else {
        Err(ExtractError::UnsupportedFileType(file_name.to_string()))
    }
}

/// Extracts text from a PDF.
///
/// `pdf-extract` handles most layouts; when it errors or yields only
/// whitespace, fall back to lopdf's page-by-page extraction, which copes
/// with some files the primary extractor rejects. Fallback output carries
/// `--- Page N ---` markers so long documents keep their page structure.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) if !text.trim().is_empty() => return Ok(text),
        Ok(_) => warn!("primary PDF extractor produced no text, trying fallback"),
        Err(e) => warn!(error = %e, "primary PDF extractor failed, trying fallback"),
    }

    let document = lopdf::Document::load_mem(bytes).map_err(|e| ExtractError::Extraction {
        format: "PDF",
        reason: e.to_string(),
    })?;

    let mut pages_text = Vec::new();
    for (page_number, _) in document.get_pages() {
        if let Ok(page_text) = document.extract_text(&[page_number]) {
            if !page_text.trim().is_empty() {
                pages_text.push(format!("--- Page {page_number} ---\n{page_text}"));
            }
        }
    }

    Ok(pages_text.join("\n\n"))
}

/// Extracts text from a DOCX file.
///
/// DOCX files are ZIP archives; the main content lives in
/// `word/document.xml` as `<w:t>` runs grouped into `<w:p>` paragraphs.
/// Non-blank paragraphs are joined with newlines.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx_err = |reason: String| ExtractError::Extraction { format: "DOCX", reason };

    let mut archive =
        ZipArchive::new(std::io::Cursor::new(bytes)).map_err(|e| docx_err(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| docx_err("word/document.xml not found".to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| docx_err(e.to_string()))?;

    let mut reader = quick_xml::Reader::from_str(&xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if start.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(end)) => match end.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim().to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Text(text)) if in_text_run => {
                current.push_str(&text.unescape().map_err(|e| docx_err(e.to_string()))?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(docx_err(e.to_string())),
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Decodes a plain text file as UTF-8, falling back to Latin-1.
fn decode_txt(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        // Latin-1: every byte maps to the code point with the same value.
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
