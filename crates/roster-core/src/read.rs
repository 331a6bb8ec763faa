//! Reading stored uploads from disk.

use std::path::Path;

use tracing::{debug, info};

use roster_ingest::{FileKind, WorkbookReader, detect_file_kind, file_extension, read_csv_records};
use roster_map::select_sheet;

use crate::error::{PipelineError, Result};
use crate::options::PipelineOptions;
use crate::pipeline::{DecodedInput, Normalized, Pipeline};
use crate::response::ReadResponse;

/// Name used for file kind detection: the original upload name when one is
/// given and non-empty, else the stored file name.
fn detection_name<'a>(path: &'a Path, original_name: Option<&'a str>) -> &'a str {
    original_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| path.file_name().and_then(|name| name.to_str()))
        .unwrap_or_default()
}

/// Decodes the stored file at `path`.
///
/// A missing file is reported before the extension is checked.
pub fn decode_file(
    path: &Path,
    original_name: Option<&str>,
    options: &PipelineOptions,
) -> Result<DecodedInput> {
    if !path.exists() {
        return Err(PipelineError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let name = detection_name(path, original_name);
    let kind = detect_file_kind(name).ok_or_else(|| PipelineError::UnsupportedShape {
        extension: file_extension(name).unwrap_or_default(),
    })?;
    debug!(path = %path.display(), name, kind = %kind, "file kind detected");

    match kind {
        FileKind::Csv => Ok(DecodedInput::Records(read_csv_records(path, &options.csv())?)),
        FileKind::Workbook => {
            let mut workbook = WorkbookReader::open(path)?;
            let names = workbook.sheet_names();
            let index = select_sheet(&names).ok_or_else(|| PipelineError::Decode {
                message: format!("workbook has no sheets: {}", path.display()),
            })?;
            info!(
                path = %path.display(),
                sheet = %names[index],
                sheets = names.len(),
                "sheet selected"
            );
            Ok(DecodedInput::Grid(workbook.read_sheet(index)?))
        }
    }
}

/// Decodes and normalizes the stored file at `path`.
pub fn read_file(
    path: &Path,
    original_name: Option<&str>,
    options: &PipelineOptions,
) -> Result<ReadResponse> {
    let input = decode_file(path, original_name, options)?;
    Pipeline::new(*options).run(&input)
}

/// Like [`read_file`] but keeps the resolved schema and mapping.
pub fn inspect_file(
    path: &Path,
    original_name: Option<&str>,
    options: &PipelineOptions,
) -> Result<Normalized<'static>> {
    let input = decode_file(path, original_name, options)?;
    Pipeline::new(*options).normalize(&input)
}
