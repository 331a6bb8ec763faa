use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },
    #[error("schema '{schema}' requires undeclared field '{field}'")]
    UnknownRequiredField { schema: String, field: String },
    #[error("schema '{schema}' has an empty field name")]
    EmptyFieldName { schema: String },
    #[error("unknown source shape: {0}")]
    UnknownShape(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
