//! File kind detection by extension.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Decoding path for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Delimited text decoded into keyed rows.
    Csv,
    /// Spreadsheet workbook decoded into a cell grid.
    Workbook,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Csv => "csv",
            FileKind::Workbook => "workbook",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workbook extensions accepted (case-insensitive).
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Lower-cased extension of `name`, if it has one.
pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Detects the decoding path from a file name's extension.
pub fn detect_file_kind(name: &str) -> Option<FileKind> {
    let ext = file_extension(name)?;
    if ext == "csv" {
        Some(FileKind::Csv)
    } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        Some(FileKind::Workbook)
    } else {
        None
    }
}
