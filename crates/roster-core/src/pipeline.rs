//! Read pipeline.
//!
//! Stages, in order:
//! 1. **Shape**: grid input goes through header location, keyed input
//!    through schema disambiguation
//! 2. **Map**: the chosen schema's mapping is computed from the headers
//! 3. **Project**: every data row becomes a [`NormalizedRecord`]

use tracing::{debug, info, warn};

use roster_map::{HeaderMatch, disambiguate, project};
use roster_model::{
    ColumnMapping, NormalizedRecord, RawGrid, RawRecordSet, SchemaDefinition, SourceShape,
};
use roster_standards::{SchemaRegistry, registry};

use crate::error::{PipelineError, Result};
use crate::options::PipelineOptions;
use crate::response::{ReadResponse, ResponseType};

/// Output of a decoding collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedInput {
    /// Cells of the selected workbook sheet.
    Grid(RawGrid),
    /// Keyed rows of a delimited file.
    Records(RawRecordSet),
}

impl DecodedInput {
    pub fn response_type(&self) -> ResponseType {
        match self {
            Self::Grid(_) => ResponseType::Excel,
            Self::Records(_) => ResponseType::Csv,
        }
    }

    pub fn shape(&self) -> SourceShape {
        match self {
            Self::Grid(_) => SourceShape::Grid,
            Self::Records(_) => SourceShape::Records,
        }
    }

    /// Number of raw rows, header rows included for grids.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Grid(grid) => grid.len(),
            Self::Records(set) => set.len(),
        }
    }
}

/// Everything the pipeline resolved for one input.
#[derive(Debug, Clone)]
pub struct Normalized<'s> {
    pub kind: ResponseType,
    pub schema: &'s SchemaDefinition,
    /// Grid row used as the header. `None` for keyed input.
    pub header_row: Option<usize>,
    pub mapping: ColumnMapping,
    /// False when keyed input fell back to a schema whose required fields
    /// are not all present.
    pub satisfied: bool,
    pub records: Vec<NormalizedRecord>,
}

impl Normalized<'_> {
    pub fn into_response(self) -> ReadResponse {
        ReadResponse {
            kind: self.kind,
            data: self.records,
        }
    }
}

/// Normalizes decoded input against a schema registry.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'r> {
    registry: &'r SchemaRegistry,
    options: PipelineOptions,
}

impl Pipeline<'static> {
    /// Pipeline over the built-in schemas.
    pub fn new(options: PipelineOptions) -> Self {
        Self::with_registry(registry(), options)
    }
}

impl<'r> Pipeline<'r> {
    pub fn with_registry(registry: &'r SchemaRegistry, options: PipelineOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Runs the pipeline and wraps the records in the success envelope.
    pub fn run(&self, input: &DecodedInput) -> Result<ReadResponse> {
        self.normalize(input).map(Normalized::into_response)
    }

    /// Runs the pipeline and keeps the resolved schema and mapping.
    pub fn normalize(&self, input: &DecodedInput) -> Result<Normalized<'r>> {
        info!(
            shape = %input.shape(),
            rows = input.row_count(),
            "normalizing input"
        );
        let normalized = match input {
            DecodedInput::Grid(grid) => self.normalize_grid(grid)?,
            DecodedInput::Records(set) => self.normalize_records(set)?,
        };
        info!(
            kind = normalized.kind.as_str(),
            schema = %normalized.schema.id,
            rows = normalized.records.len(),
            "records normalized"
        );
        Ok(normalized)
    }

    fn normalize_grid(&self, grid: &RawGrid) -> Result<Normalized<'r>> {
        let locator = self.options.locator();
        let mut first_error = None;

        for schema in self.registry.for_shape(SourceShape::Grid) {
            match locator.locate(grid, schema) {
                Ok(HeaderMatch { row_index, mapping }) => {
                    let rows = grid.rows.get(row_index + 1..).unwrap_or(&[]);
                    let records = project(rows, &mapping, schema);
                    return Ok(Normalized {
                        kind: ResponseType::Excel,
                        schema,
                        header_row: Some(row_index),
                        mapping,
                        satisfied: true,
                        records,
                    });
                }
                Err(error) => {
                    debug!(schema = %schema.id, %error, "header not located");
                    first_error.get_or_insert(error);
                }
            }
        }

        match first_error {
            Some(error) => Err(error.into()),
            None => Err(no_schema_for(SourceShape::Grid)),
        }
    }

    fn normalize_records(&self, set: &RawRecordSet) -> Result<Normalized<'r>> {
        let candidates = self.registry.for_shape(SourceShape::Records);
        let resolution =
            disambiguate(&candidates, &set.headers).ok_or_else(|| no_schema_for(SourceShape::Records))?;

        if !resolution.satisfied {
            let missing = resolution.missing_required();
            if self.options.strict_records {
                return Err(PipelineError::NoSchemaMatched { missing });
            }
            warn!(
                schema = %resolution.schema.id,
                missing = %missing.join(","),
                "normalizing without required fields"
            );
        }

        let records = project(&set.rows, &resolution.mapping, resolution.schema);
        Ok(Normalized {
            kind: ResponseType::Csv,
            schema: resolution.schema,
            header_row: None,
            mapping: resolution.mapping,
            satisfied: resolution.satisfied,
            records,
        })
    }
}

fn no_schema_for(shape: SourceShape) -> PipelineError {
    PipelineError::Decode {
        message: format!("no schema registered for {shape} input"),
    }
}
