//! Header row location for grid input.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use roster_model::{CellValue, ColumnMapping, RawGrid, SchemaDefinition};

use crate::error::LocateError;
use crate::mapper::map_cells;

/// Rows scanned for a header when nothing else is configured.
pub const DEFAULT_SCAN_ROWS: usize = 10;

/// When a scanned row is accepted as the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderPolicy {
    /// Accept the first row with at least one exact synonym match. If that
    /// row lacks a required field, location fails without scanning further.
    #[default]
    FirstMatch,
    /// Skip rows until one maps every required field.
    RequireAll,
}

/// The header row of a grid and the mapping read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub row_index: usize,
    pub mapping: ColumnMapping,
}

impl HeaderMatch {
    /// Rows strictly after the header row.
    pub fn data_rows<'g>(&self, grid: &'g RawGrid) -> &'g [Vec<CellValue>] {
        grid.rows.get(self.row_index + 1..).unwrap_or(&[])
    }
}

/// Scans the top of a grid for the row that best matches a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocator {
    pub scan_rows: usize,
    pub policy: HeaderPolicy,
}

impl Default for HeaderLocator {
    fn default() -> Self {
        Self {
            scan_rows: DEFAULT_SCAN_ROWS,
            policy: HeaderPolicy::default(),
        }
    }
}

impl HeaderLocator {
    pub fn new(scan_rows: usize, policy: HeaderPolicy) -> Self {
        Self { scan_rows, policy }
    }

    #[must_use]
    pub fn with_scan_rows(mut self, scan_rows: usize) -> Self {
        self.scan_rows = scan_rows;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: HeaderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Finds the header row of `grid` for `schema`.
    ///
    /// Only rows `0..min(scan_rows, grid.len())` are examined. A row counts
    /// as a match when at least one of its cells equals a synonym after
    /// normalization; substring matches do not count toward acceptance.
    pub fn locate(
        &self,
        grid: &RawGrid,
        schema: &SchemaDefinition,
    ) -> Result<HeaderMatch, LocateError> {
        let window = self.scan_rows.min(grid.len());

        for (row_index, row) in grid.rows.iter().take(window).enumerate() {
            let mapping = map_cells(schema, row);
            let matched = mapping.exact_count();
            debug!(schema = %schema.id, row = row_index, matched, "scanned header candidate");
            if matched == 0 {
                continue;
            }

            let missing = mapping.missing_required(schema);
            if missing.is_empty() {
                info!(
                    schema = %schema.id,
                    row = row_index,
                    mapped = mapping.len(),
                    "header row located"
                );
                return Ok(HeaderMatch { row_index, mapping });
            }

            match self.policy {
                HeaderPolicy::FirstMatch => {
                    return Err(self.missing_error(grid, schema, missing, Some(row_index), window));
                }
                HeaderPolicy::RequireAll => {
                    debug!(
                        schema = %schema.id,
                        row = row_index,
                        missing = %missing.join(","),
                        "row skipped, required fields missing"
                    );
                }
            }
        }

        let missing = schema.required_fields().map(|f| f.name.clone()).collect();
        Err(self.missing_error(grid, schema, missing, None, window))
    }

    fn missing_error(
        &self,
        grid: &RawGrid,
        schema: &SchemaDefinition,
        missing: Vec<String>,
        header_row: Option<usize>,
        window: usize,
    ) -> LocateError {
        let candidates = grid
            .rows
            .iter()
            .take(window)
            .map(|row| row.iter().map(CellValue::render).collect())
            .collect();
        LocateError::RequiredColumnMissing {
            schema: schema.id.clone(),
            missing,
            header_row,
            scanned_rows: window,
            candidates,
        }
    }
}
