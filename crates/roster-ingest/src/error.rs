//! Error types for file decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Stored file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// File starts with a byte-order mark we do not decode.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Failed to parse CSV records.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Header line repeats a column name and the policy rejects duplicates.
    #[error("duplicate header '{header}' in {path}")]
    DuplicateHeader { path: PathBuf, header: String },

    // === Workbook Errors ===
    /// Failed to open or parse the workbook container.
    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook contains no sheets.
    #[error("workbook has no sheets: {path}")]
    NoSheets { path: PathBuf },

    /// Failed to read a sheet's cell range.
    #[error("failed to read sheet '{sheet}' in {path}: {message}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        message: String,
    },
}

impl IngestError {
    /// Maps an `open` failure to `FileNotFound` or `FileRead`.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
