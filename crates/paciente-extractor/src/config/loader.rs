use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::schema::{ConfigFormat, FieldValidator, FieldsConfig};
use crate::error::ConfigError;
use crate::fields::compile_rule;

const SCHEMA_JSON: &str = include_str!("../../schema/fields-v1.json");
const DEFAULT_FIELDS_JSON: &str = include_str!("../../defaults/fields.json");

/// Environment variable holding the path of a field configuration file.
pub const CONFIG_ENV: &str = "PACIENTE_FIELDS_CONFIG";

const CONFIG_DIR_NAME: &str = "paciente-extractor";
const CONFIG_FILE_NAME: &str = "fields.json";

/// Field name reserved for the error record.
pub const RESERVED_FIELD_NAME: &str = "error";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FieldsConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ConfigFormat::from_extension)
        .unwrap_or(ConfigFormat::Json);

    load_config_from_str(&content, format)
}

pub fn load_config_from_str(
    content: &str,
    format: ConfigFormat,
) -> Result<FieldsConfig, ConfigError> {
    let json_value: serde_json::Value = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    };

    validate_schema(&json_value)?;

    let config: FieldsConfig = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

/// The built-in Spanish vocabulary shipped with the crate.
pub fn default_config() -> Result<FieldsConfig, ConfigError> {
    load_config_from_str(DEFAULT_FIELDS_JSON, ConfigFormat::Json)
}

/// Looks for a configuration file: `$PACIENTE_FIELDS_CONFIG` first, then
/// `<config dir>/paciente-extractor/fields.json` when it exists.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

pub fn resolve_config() -> Result<FieldsConfig, ConfigError> {
    match resolve_config_path() {
        Some(path) => {
            log::debug!("Loading field configuration from {}", path.display());
            load_config(&path)
        }
        None => {
            log::debug!("Using built-in field configuration");
            default_config()
        }
    }
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();

    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

pub(crate) fn validate_config(config: &FieldsConfig) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    let mut names = HashSet::new();
    for field in &config.fields {
        if field.name == RESERVED_FIELD_NAME {
            return Err(ConfigError::InvalidField {
                name: field.name.clone(),
                reason: "Name is reserved for error records".to_string(),
            });
        }

        if !names.insert(field.name.as_str()) {
            return Err(ConfigError::InvalidField {
                name: field.name.clone(),
                reason: "Duplicate field name".to_string(),
            });
        }

        if field.cues.is_empty() || field.cues.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidField {
                name: field.name.clone(),
                reason: "Cues must be non-empty".to_string(),
            });
        }

        compile_rule(field)?;

        if let Some(validator) = &field.validate {
            validate_validator(&field.name, validator)?;
        }
    }

    Ok(())
}

fn validate_validator(name: &str, validator: &FieldValidator) -> Result<(), ConfigError> {
    let reason = match validator {
        FieldValidator::Digits { min, max } if *min == 0 || min > max => Some(format!(
            "Digit bounds must satisfy 1 <= min <= max (got {}..={})",
            min, max
        )),
        FieldValidator::Date { formats } if formats.is_empty() => {
            Some("Date validator needs at least one format".to_string())
        }
        FieldValidator::OneOf { values } if values.is_empty() => {
            Some("one_of validator needs at least one value".to_string())
        }
        _ => None,
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidField {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
