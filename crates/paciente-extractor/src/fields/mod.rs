//! Label-driven field extraction over plain text.

pub mod matcher;
pub mod normalize;
pub mod validate;

pub use matcher::{compile_rule, ExtractionResult, FieldMatcher};
pub use normalize::apply_normalization;
pub use validate::{validate_extracted, ValidationIssue};
