//! CSV decoding into keyed record sets.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use roster_model::RawRecordSet;

use crate::error::{IngestError, Result};

use super::header::{DuplicateHeaderPolicy, resolve_headers};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Options for [`read_csv_records`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvOptions {
    pub duplicate_headers: DuplicateHeaderPolicy,
}

impl CsvOptions {
    #[must_use]
    pub fn with_duplicate_headers(mut self, policy: DuplicateHeaderPolicy) -> Self {
        self.duplicate_headers = policy;
        self
    }
}

/// Reads a delimited file into a [`RawRecordSet`].
///
/// The first non-blank line is the header line. Zero-length lines are
/// skipped; a line holding only delimiters (`,,`) is a row of empty values.
pub fn read_csv_records(path: &Path, options: &CsvOptions) -> Result<RawRecordSet> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    parse_csv_bytes(&bytes, path, options)
}

/// Decodes already-loaded CSV bytes. `path` is used for error context only.
pub fn parse_csv_bytes(bytes: &[u8], path: &Path, options: &CsvOptions) -> Result<RawRecordSet> {
    let text = decode_text(bytes, path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();

    let Some(header) = records.next() else {
        debug!(path = %path.display(), "csv has no header line");
        return Ok(RawRecordSet::default());
    };
    let header = header.map_err(|source| csv_error(path, source))?;
    let raw: Vec<String> = header.iter().map(str::to_string).collect();
    let headers = resolve_headers(&raw, options.duplicate_headers).map_err(|header| {
        IngestError::DuplicateHeader {
            path: path.to_path_buf(),
            header,
        }
    })?;
    debug!(
        path = %path.display(),
        columns = headers.keys.len(),
        policy = %options.duplicate_headers,
        "csv header parsed"
    );

    let keys = headers.keys;
    let mut set = RawRecordSet::new(headers.columns);
    for record in records {
        let record = record.map_err(|source| csv_error(path, source))?;
        if record.len() > keys.len() {
            warn!(
                path = %path.display(),
                line = record.position().map_or(0, csv::Position::line),
                values = record.len(),
                columns = keys.len(),
                "row has more values than headers, extra values dropped"
            );
        }
        set.push_row(
            keys.iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect(),
        );
    }

    debug!(
        path = %path.display(),
        rows = set.len(),
        "csv decoded"
    );
    Ok(set)
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}

/// Returns the file as text, stripping a UTF-8 BOM.
///
/// Invalid UTF-8 falls back to Windows-1252. UTF-16 byte-order marks are
/// rejected.
fn decode_text<'a>(bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
            debug!(path = %path.display(), "csv is not UTF-8, decoded as Windows-1252");
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8]) -> Result<RawRecordSet> {
        parse_csv_bytes(bytes, Path::new("upload.csv"), &CsvOptions::default())
    }

    #[test]
    fn reads_keyed_rows() {
        let set = parse(b"login,role\nalice,admin\nbob,member\n").unwrap();
        assert_eq!(set.headers, vec!["login", "role"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows[1]["role"], "member");
    }

    #[test]
    fn strips_utf8_bom_and_trims_headers() {
        let set = parse(b"\xEF\xBB\xBF login , role\nalice,admin\n").unwrap();
        assert_eq!(set.headers, vec!["login", "role"]);
        assert_eq!(set.rows[0]["login"], "alice");
    }

    #[test]
    fn skips_zero_length_lines() {
        let set = parse(b"\nlogin,role\n\nalice,admin\n\r\n\n").unwrap();
        assert_eq!(set.headers, vec!["login", "role"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn delimiter_only_line_is_a_row() {
        let set = parse(b"login,role\n,\nalice,admin\n").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows[0]["login"], "");
        assert_eq!(set.rows[0]["role"], "");
        assert_eq!(set.rows[1]["login"], "alice");
    }

    #[test]
    fn short_rows_leave_keys_out() {
        let set = parse(b"login,name,role\nalice\n").unwrap();
        assert_eq!(set.rows[0].len(), 1);
        assert!(!set.rows[0].contains_key("role"));
    }

    #[test]
    fn long_rows_drop_extra_values() {
        let set = parse(b"login,role\nalice,admin,extra\n").unwrap();
        assert_eq!(set.rows[0].len(), 2);
    }

    #[test]
    fn windows_1252_fallback() {
        let set = parse(b"login,nombre\nana,Jos\xE9\n").unwrap();
        assert_eq!(set.rows[0]["nombre"], "José");
    }

    #[test]
    fn rejects_utf16() {
        let err = parse(b"\xFF\xFEl\0o\0").unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }

    #[test]
    fn empty_input_has_no_headers() {
        let set = parse(b"").unwrap();
        assert!(set.headers.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn duplicate_policies() {
        let bytes = b"login,login,role\nfirst,second,admin\n";
        let path = Path::new("dup.csv");

        let set = parse_csv_bytes(bytes, path, &CsvOptions::default()).unwrap();
        assert_eq!(set.headers, vec!["login", "role"]);
        assert_eq!(set.rows[0]["login"], "second");

        let options = CsvOptions::default().with_duplicate_headers(DuplicateHeaderPolicy::Suffix);
        let set = parse_csv_bytes(bytes, path, &options).unwrap();
        assert_eq!(set.headers, vec!["login", "login_2", "role"]);
        assert_eq!(set.rows[0]["login"], "first");
        assert_eq!(set.rows[0]["login_2"], "second");

        let options = CsvOptions::default().with_duplicate_headers(DuplicateHeaderPolicy::Reject);
        let err = parse_csv_bytes(bytes, path, &options).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateHeader { ref header, .. } if header == "login"));
    }
}
