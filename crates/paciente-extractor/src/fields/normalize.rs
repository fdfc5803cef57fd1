use crate::config::schema::Normalization;

/// Every mode trims; the other modes apply on top of the trimmed value.
pub fn apply_normalization(value: &str, normalization: Normalization) -> String {
    let trimmed = value.trim();
    match normalization {
        Normalization::Trim => trimmed.to_string(),
        Normalization::CollapseWhitespace => collapse_whitespace(trimmed),
        Normalization::Uppercase => trimmed.to_uppercase(),
        Normalization::Lowercase => trimmed.to_lowercase(),
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
