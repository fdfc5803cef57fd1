use std::fmt;

use chrono::NaiveDate;

use crate::config::schema::{FieldRule, FieldValidator};
use crate::fields::matcher::ExtractionResult;

/// A problem found in an extracted record. Validation is advisory: it never
/// changes what gets extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    Missing {
        field: String,
    },
    Invalid {
        field: String,
        value: String,
        reason: String,
    },
}

impl ValidationIssue {
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::Invalid { field, .. } => field,
        }
    }
}

// Values stay out of the message so issues can be logged.
impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "required field '{}' is missing", field),
            Self::Invalid { field, reason, .. } => {
                write!(f, "field '{}' is invalid: {}", field, reason)
            }
        }
    }
}

pub fn validate_extracted(rules: &[FieldRule], result: &ExtractionResult) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for rule in rules {
        match result.get(&rule.name) {
            None if rule.required => issues.push(ValidationIssue::Missing {
                field: rule.name.clone(),
            }),
            None => {}
            Some(value) => {
                if let Some(reason) = rule.validate.as_ref().and_then(|v| check(v, value)) {
                    issues.push(ValidationIssue::Invalid {
                        field: rule.name.clone(),
                        value: value.to_string(),
                        reason,
                    });
                }
            }
        }
    }

    issues
}

fn check(validator: &FieldValidator, value: &str) -> Option<String> {
    match validator {
        FieldValidator::Digits { min, max } => {
            let len = value.chars().count();
            if !value.chars().all(|c| c.is_ascii_digit()) {
                Some("expected only digits".to_string())
            } else if len < *min || len > *max {
                Some(format!("expected {}-{} digits, got {}", min, max, len))
            } else {
                None
            }
        }
        FieldValidator::Date { formats } => {
            if formats
                .iter()
                .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
            {
                None
            } else {
                Some(format!("not a valid date in formats {}", formats.join(", ")))
            }
        }
        FieldValidator::OneOf { values } => {
            let lowered = value.to_lowercase();
            if values.iter().any(|v| v.to_lowercase() == lowered) {
                None
            } else {
                Some(format!("expected one of {}", values.join(", ")))
            }
        }
    }
}
