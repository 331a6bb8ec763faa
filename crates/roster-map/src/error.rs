//! Error types for header location.

use thiserror::Error;

/// Errors from locating the header row of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    /// No scanned row yielded a mapping that covers the required fields.
    #[error(
        "required column(s) {} not found for schema '{schema}' in the first {scanned_rows} row(s)",
        .missing.join(", ")
    )]
    RequiredColumnMissing {
        schema: String,
        /// Required fields still unmapped.
        missing: Vec<String>,
        /// Row accepted as header before the required check failed, if any.
        header_row: Option<usize>,
        scanned_rows: usize,
        /// Scanned rows rendered to text, for diagnostics.
        candidates: Vec<Vec<String>>,
    },
}
