use std::path::Path;

use crate::error::ExtractError;
use crate::processor::{DocumentProcessor, ProcessedContent};
use crate::sanitize::hash_path;

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfProcessor;

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentProcessor for PdfProcessor {
    fn process(&self, path: &Path) -> Result<ProcessedContent, ExtractError> {
        let _span = tracing::info_span!("processor.pdf", path_hash = %hash_path(path)).entered();

        // The handle lives only for this read, whatever happens next.
        let pdf_bytes = std::fs::read(path).map_err(|e| ExtractError::NotReadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        let doc = lopdf::Document::load_mem(&pdf_bytes)
            .map_err(|e| ExtractError::UnsupportedFormat(e.to_string()))?;

        let page_count = doc.get_pages().len();
        let text = extract_text_from_pdf(&doc)?;

        if looks_unextractable(&text) {
            tracing::warn!(
                pages = page_count,
                "PDF has no usable text layer; it is probably scanned and would need OCR"
            );
        }

        tracing::debug!(pages = page_count, chars = text.chars().count(), "Extracted PDF text");

        Ok(ProcessedContent { text, page_count })
    }
}

/// Concatenates page text in page order with no separator between pages.
fn extract_text_from_pdf(doc: &lopdf::Document) -> Result<String, ExtractError> {
    let mut text = String::new();

    for page_num in doc.get_pages().keys() {
        let page_text = doc
            .extract_text(&[*page_num])
            .map_err(|e| ExtractError::DecodeFailure {
                page: *page_num,
                reason: e.to_string(),
            })?;
        text.push_str(&page_text);
    }

    Ok(text)
}

/// Marker lopdf emits for CID fonts it cannot decode.
const IDENTITY_H_PATTERN: &str = "?Identity-H Unimplemented?";

/// Text shorter than this is accepted regardless of composition.
const MIN_TOTAL_CHARS: usize = 50;

/// Below this share of alphanumeric characters the text is treated as garbled.
const MIN_ALPHANUMERIC_PERCENT: usize = 10;

fn looks_unextractable(text: &str) -> bool {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return true;
    }

    let cleaned = trimmed
        .replace(IDENTITY_H_PATTERN, "")
        .replace(['\n', ' '], "");

    if cleaned.is_empty() {
        return true;
    }

    let total_chars = trimmed.chars().count();
    let alphanumeric_chars = trimmed.chars().filter(|c| c.is_alphanumeric()).count();

    total_chars > MIN_TOTAL_CHARS && alphanumeric_chars * 100 < total_chars * MIN_ALPHANUMERIC_PERCENT
}
