//! Embedded schema data.
//!
//! The schema table is compiled in with `include_str!()` so the registry
//! never touches the filesystem at runtime.

/// Schema table: one row per field.
///
/// Columns: `schema,shape,priority,field,synonyms,required`. Synonyms are
/// `|`-separated; `required` is `Y` or `N`.
pub const SCHEMAS_CSV: &str = include_str!("../data/schemas.csv");

/// File name used in error messages for the embedded table.
pub const SCHEMAS_FILE: &str = "schemas.csv";
