//! Data model shared by every roster crate.
//!
//! Inputs arrive as a [`RawGrid`] (workbook sheet, positional cells) or a
//! [`RawRecordSet`] (delimited text, keyed by header). Schemas describe the
//! target record shapes; a [`ColumnMapping`] ties schema fields to source
//! columns and a [`NormalizedRecord`] is the projected output row.

pub mod cell;
pub mod error;
pub mod mapping;
pub mod record;
pub mod schema;
pub mod table;

pub use cell::{CellValue, format_numeric};
pub use error::{ModelError, Result};
pub use mapping::{ColumnId, ColumnMapping, MappedColumn, MatchKind};
pub use record::NormalizedRecord;
pub use schema::{FieldSpec, SchemaDefinition, SourceShape};
pub use table::{RawGrid, RawRecordSet, RecordRow};
