use thiserror::Error;
use wickwise_schemas::material::ComponentCategory;

#[derive(Debug, Error)]
pub enum WickwiseError {
    #[error("Invalid value {value} for '{field}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("'{key}' not found in {table}")]
    UnknownKey { table: String, key: String },

    #[error("No material selected for the {0} zone")]
    IncompleteDesignState(ComponentCategory),

    #[error("Material '{id}' is a {actual} material, not a {expected} material")]
    CategoryMismatch {
        id: String,
        expected: ComponentCategory,
        actual: ComponentCategory,
    },

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}

impl WickwiseError {
    pub fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        WickwiseError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unknown(table: impl Into<String>, key: impl Into<String>) -> Self {
        WickwiseError::UnknownKey {
            table: table.into(),
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WickwiseError>;
