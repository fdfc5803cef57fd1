//! Extracts patient fields from the text layer of PDF medical documents.
//!
//! The flow is strictly linear: [`processor::PdfProcessor`] turns the file
//! into text, [`fields::FieldMatcher`] applies one labelled pattern per field,
//! and [`output::Outcome`] renders the record (or an error) as JSON.

pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod sanitize;

pub use config::{default_config, load_config, resolve_config, FieldRule, FieldsConfig};
pub use error::{ConfigError, ExtractError, ExtractErrorKind, ExtractorError, Result};
pub use fields::{ExtractionResult, FieldMatcher, ValidationIssue};
pub use output::{ErrorResult, Outcome};
pub use pipeline::Pipeline;
pub use processor::{DocumentProcessor, PdfProcessor, ProcessedContent};
