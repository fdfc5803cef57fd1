use std::path::Path;

use crate::config::schema::{FieldRule, FieldsConfig};
use crate::error::{ConfigError, ExtractError};
use crate::fields::{validate_extracted, ExtractionResult, FieldMatcher, ValidationIssue};
use crate::output::Outcome;
use crate::processor::{DocumentProcessor, PdfProcessor};
use crate::sanitize::hash_path;

/// Extractor → matcher, for one document at a time.
pub struct Pipeline<P: DocumentProcessor = PdfProcessor> {
    processor: P,
    matcher: FieldMatcher,
    rules: Vec<FieldRule>,
}

impl Pipeline<PdfProcessor> {
    pub fn new(config: &FieldsConfig) -> Result<Self, ConfigError> {
        Self::with_processor(PdfProcessor::new(), config)
    }
}

impl<P: DocumentProcessor> Pipeline<P> {
    pub fn with_processor(processor: P, config: &FieldsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            processor,
            matcher: FieldMatcher::new(&config.fields)?,
            rules: config.fields.clone(),
        })
    }

    pub fn try_run(&self, path: &Path) -> Result<ExtractionResult, ExtractError> {
        let processed = self.processor.process(path)?;
        Ok(self.matcher.extract(&processed.text))
    }

    /// Extraction failures become an error record instead of propagating.
    pub fn run(&self, path: &Path) -> Outcome {
        let _span = tracing::info_span!("pipeline.run", path_hash = %hash_path(path)).entered();

        match self.try_run(path) {
            Ok(result) => {
                for issue in self.validate(&result) {
                    tracing::warn!(field = issue.field(), "{}", issue);
                }
                tracing::info!(fields = result.len(), "Extraction complete");
                Outcome::Extracted(result)
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), reason = %e.log_reason(), "Extraction failed");
                Outcome::error(e.to_string())
            }
        }
    }

    pub fn validate(&self, result: &ExtractionResult) -> Vec<ValidationIssue> {
        validate_extracted(&self.rules, result)
    }
}
