pub mod loader;
pub mod schema;

pub use loader::{
    default_config, load_config, load_config_from_str, resolve_config, resolve_config_path,
    CONFIG_ENV, RESERVED_FIELD_NAME,
};
pub use schema::{ConfigFormat, FieldRule, FieldValidator, FieldsConfig, Normalization};
