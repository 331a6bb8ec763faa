//! Workbook decoding into raw grids.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Range, Reader, Sheets, open_workbook_auto_from_rs};
use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, info};

use roster_model::{CellValue, RawGrid};

use crate::error::{IngestError, Result};

/// An open spreadsheet workbook (xlsx, xlsm, xls or ods).
pub struct WorkbookReader {
    path: PathBuf,
    sheets: Sheets<Cursor<Vec<u8>>>,
}

impl std::fmt::Debug for WorkbookReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookReader")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl WorkbookReader {
    /// Opens the workbook at `path`.
    ///
    /// The container format is sniffed from the content, so stored uploads
    /// without an extension open as well.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
        Self::from_bytes(bytes, path)
    }

    /// Opens an in-memory workbook. `path` is used for error context only.
    pub fn from_bytes(bytes: Vec<u8>, path: &Path) -> Result<Self> {
        let sheets =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestError::Workbook {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let reader = Self {
            path: path.to_path_buf(),
            sheets,
        };
        debug!(path = %path.display(), sheets = reader.sheet_names().len(), "workbook opened");
        Ok(reader)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// Decodes the sheet at `index` into a grid anchored at cell A1.
    pub fn read_sheet(&mut self, index: usize) -> Result<RawGrid> {
        let name = self
            .sheet_names()
            .get(index)
            .cloned()
            .ok_or_else(|| IngestError::NoSheets {
                path: self.path.clone(),
            })?;
        let range = self
            .sheets
            .worksheet_range_at(index)
            .ok_or_else(|| IngestError::NoSheets {
                path: self.path.clone(),
            })?
            .map_err(|e| IngestError::SheetRead {
                path: self.path.clone(),
                sheet: name.clone(),
                message: e.to_string(),
            })?;

        let grid = range_to_grid(&range);
        info!(
            path = %self.path.display(),
            sheet = %name,
            rows = grid.len(),
            columns = grid.width(),
            "sheet decoded"
        );
        Ok(grid)
    }
}

/// Converts a calamine range into rows of cells.
///
/// Ranges that start below or right of A1 are padded with empty rows and
/// leading empty cells so positions match the sheet.
pub fn range_to_grid(range: &Range<Data>) -> RawGrid {
    let Some((start_row, start_col)) = range.start() else {
        return RawGrid::default();
    };
    let mut grid = RawGrid::default();
    for _ in 0..start_row {
        grid.push_row(Vec::new());
    }
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(convert_cell));
        grid.push_row(cells);
    }
    grid
}

/// Converts one calamine cell.
///
/// Date cells become ISO text: a date alone at midnight, otherwise date and
/// time. Error cells decode as empty.
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(value) => CellValue::text(value.clone()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(_) => match DataType::as_datetime(cell) {
            Some(value) => CellValue::Text(format_datetime(value)),
            None => CellValue::Empty,
        },
        Data::DateTimeIso(value) | Data::DurationIso(value) => CellValue::text(value.clone()),
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    if value.time().num_seconds_from_midnight() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
