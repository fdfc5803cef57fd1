//! Helpers for keeping patient data out of log output.
//!
//! Input files are often named after the patient, so spans identify a
//! document only by a hash of its path, and never carry extracted values.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Short deterministic hash of a path, for correlating log lines.
pub fn hash_path(path: &Path) -> String {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
