//! Error types for schema table loading.

use thiserror::Error;

use roster_model::ModelError;

/// Errors that can occur when building the schema registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Failed to read or parse the CSV table.
    #[error("Failed to read CSV {file}: {source}")]
    CsvRead {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Invalid value in a CSV field.
    #[error("Invalid {field} value '{value}' in {file} (line {line})")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: String,
        line: u64,
    },

    /// Rows for one schema disagree on shape or priority.
    #[error("Schema '{schema}' has conflicting {attribute} values in {file}")]
    Inconsistent {
        schema: String,
        attribute: &'static str,
        file: String,
    },

    /// A schema declares no required field.
    #[error("Schema '{schema}' declares no required field")]
    NoRequiredField { schema: String },

    /// The assembled definition failed model validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for standards loading operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
