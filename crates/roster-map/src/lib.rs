//! Schema inference and column mapping for roster exports.
//!
//! Leaf-first:
//!
//! - [`normalize`]: canonical header form used by every comparison
//! - [`map_headers`] / [`map_cells`]: synonym match, then substring fallback
//! - [`HeaderLocator`]: finds the header row inside a raw grid
//! - [`disambiguate`]: picks a schema for keyed rows without a shape hint
//! - [`select_sheet`]: picks the data sheet of a workbook
//! - [`project`]: applies a mapping to every row

#![deny(unsafe_code)]

pub mod disambiguate;
pub mod error;
pub mod locate;
pub mod mapper;
pub mod normalize;
pub mod project;
pub mod sheet;

pub use disambiguate::{Resolution, disambiguate};
pub use error::LocateError;
pub use locate::{DEFAULT_SCAN_ROWS, HeaderLocator, HeaderMatch, HeaderPolicy};
pub use mapper::{map_cells, map_headers};
pub use normalize::{normalize, normalize_cell};
pub use project::{CellSource, project};
pub use sheet::{PREFERRED_SHEET, select_sheet};
