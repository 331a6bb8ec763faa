//! CSV decoding.

mod header;
mod reader;

pub use header::{CsvHeaders, DuplicateHeaderPolicy, normalize_header, resolve_headers};
pub use reader::{CsvOptions, parse_csv_bytes, read_csv_records};
