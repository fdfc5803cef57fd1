pub mod pdf;

use std::path::Path;

use crate::error::ExtractError;

pub use pdf::PdfProcessor;

pub struct ProcessedContent {
    pub text: String,
    pub page_count: usize,
}

/// Turns a document on disk into plain text.
pub trait DocumentProcessor: Send + Sync {
    fn process(&self, path: &Path) -> Result<ProcessedContent, ExtractError>;
}
