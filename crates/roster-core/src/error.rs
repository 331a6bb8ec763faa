//! Pipeline error taxonomy and status classes.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use roster_ingest::IngestError;
use roster_map::LocateError;

/// Coarse outcome class a transport maps onto its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusClass {
    ClientError,
    NotFound,
    ServerError,
}

impl StatusClass {
    /// Equivalent HTTP status code.
    pub fn http_code(&self) -> u16 {
        match self {
            Self::ClientError => 400,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ClientError => "client error",
            Self::NotFound => "not found",
            Self::ServerError => "server error",
        };
        f.write_str(label)
    }
}

/// Errors that abort a read request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// File type not recognized from its extension.
    #[error("unsupported file type{}", display_extension(.extension))]
    UnsupportedShape { extension: String },

    /// Header row lacks a required field of the grid schema.
    #[error(
        "required column(s) {} not found for schema '{schema}'",
        .missing.join(", ")
    )]
    RequiredColumnMissing {
        schema: String,
        missing: Vec<String>,
        /// Scanned rows rendered to text.
        candidates: Vec<Vec<String>>,
    },

    /// The file could not be decoded.
    #[error("failed to decode file: {message}")]
    Decode { message: String },

    /// Stored file does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Strict record mode: no schema had its required fields.
    #[error("no schema matched the headers, missing: {}", .missing.join(", "))]
    NoSchemaMatched { missing: Vec<String> },

    /// Header line repeats a column and duplicates are rejected.
    #[error("duplicate header '{header}'")]
    DuplicateHeader { header: String },
}

fn display_extension(extension: &str) -> String {
    if extension.is_empty() {
        String::new()
    } else {
        format!(" '.{extension}'")
    }
}

impl PipelineError {
    pub fn status(&self) -> StatusClass {
        match self {
            Self::UnsupportedShape { .. }
            | Self::RequiredColumnMissing { .. }
            | Self::NoSchemaMatched { .. }
            | Self::DuplicateHeader { .. } => StatusClass::ClientError,
            Self::NotFound { .. } => StatusClass::NotFound,
            Self::Decode { .. } => StatusClass::ServerError,
        }
    }

    /// The error envelope sent back to the caller.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::FileNotFound { path } => Self::NotFound { path },
            IngestError::DuplicateHeader { header, .. } => Self::DuplicateHeader { header },
            other => Self::Decode {
                message: other.to_string(),
            },
        }
    }
}

impl From<LocateError> for PipelineError {
    fn from(error: LocateError) -> Self {
        match error {
            LocateError::RequiredColumnMissing {
                schema,
                missing,
                candidates,
                ..
            } => Self::RequiredColumnMissing {
                schema,
                missing,
                candidates,
            },
        }
    }
}

/// `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
