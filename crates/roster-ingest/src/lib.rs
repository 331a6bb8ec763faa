//! Decoding of uploaded roster files.
//!
//! Delimited text becomes a [`RawRecordSet`](roster_model::RawRecordSet)
//! keyed by its header line; workbooks become a
//! [`RawGrid`](roster_model::RawGrid) per sheet with no header semantics.
//! The decoding path is chosen from the file extension with
//! [`detect_file_kind`].

pub mod csv;
pub mod error;
pub mod kind;
pub mod workbook;

pub use self::csv::{
    CsvHeaders, CsvOptions, DuplicateHeaderPolicy, parse_csv_bytes, read_csv_records,
    resolve_headers,
};
pub use error::{IngestError, Result};
pub use kind::{FileKind, WORKBOOK_EXTENSIONS, detect_file_kind, file_extension};
pub use workbook::{WorkbookReader, convert_cell, range_to_grid};
