use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Failed to parse config YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Invalid capture pattern for field '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("Invalid field '{name}': {reason}")]
    InvalidField { name: String, reason: String },
}

/// Failures while turning a PDF on disk into text.
///
/// The variants form a closed set so callers can branch on [`ExtractErrorKind`]
/// instead of parsing the message.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read document '{path}': {source}")]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported or corrupt PDF: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode text on page {page}: {reason}")]
    DecodeFailure { page: u32, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractErrorKind {
    NotReadable,
    UnsupportedFormat,
    DecodeFailure,
}

impl ExtractError {
    pub fn kind(&self) -> ExtractErrorKind {
        match self {
            Self::NotReadable { .. } => ExtractErrorKind::NotReadable,
            Self::UnsupportedFormat(_) => ExtractErrorKind::UnsupportedFormat,
            Self::DecodeFailure { .. } => ExtractErrorKind::DecodeFailure,
        }
    }

    /// The failure cause without the input path, for log fields.
    pub fn log_reason(&self) -> String {
        match self {
            Self::NotReadable { source, .. } => source.to_string(),
            Self::UnsupportedFormat(reason) => reason.clone(),
            Self::DecodeFailure { page, reason } => format!("page {}: {}", page, reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;
