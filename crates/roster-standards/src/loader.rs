//! Schema table loading.
//!
//! Parses the embedded `schemas.csv` table into [`SchemaDefinition`]s.

use std::io::Cursor;

use serde::Deserialize;

use roster_model::{FieldSpec, SchemaDefinition, SourceShape};

use crate::error::{Result, StandardsError};

/// Row from schemas.csv.
#[derive(Debug, Deserialize)]
struct SchemaCsvRow {
    schema: String,
    shape: String,
    priority: String,
    field: String,
    synonyms: String,
    required: String,
}

/// Fields collected for one schema while reading the table.
struct SchemaRows {
    id: String,
    shape: SourceShape,
    priority: u32,
    fields: Vec<FieldSpec>,
    required: Vec<String>,
}

/// Load schema definitions from CSV text.
///
/// Schemas come back in the order they first appear in the table. Only the
/// listed synonyms are exact matches; a field's own name is not added, so
/// `nombre` never claims a bare "Nombre" cell.
pub fn load_schemas_from_str(content: &str, file: &str) -> Result<Vec<SchemaDefinition>> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(cursor);

    let headers = reader
        .headers()
        .map_err(|source| StandardsError::CsvRead {
            file: file.to_string(),
            source,
        })?
        .clone();

    let mut grouped: Vec<SchemaRows> = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|source| StandardsError::CsvRead {
            file: file.to_string(),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: SchemaCsvRow =
            record
                .deserialize(Some(&headers))
                .map_err(|source| StandardsError::CsvRead {
                    file: file.to_string(),
                    source,
                })?;

        let id = row.schema.trim().to_string();
        if id.is_empty() {
            continue;
        }
        let shape: SourceShape = row.shape.parse().map_err(|_| StandardsError::InvalidValue {
            field: "shape",
            value: row.shape.clone(),
            file: file.to_string(),
            line,
        })?;
        let priority: u32 = row
            .priority
            .trim()
            .parse()
            .map_err(|_| StandardsError::InvalidValue {
                field: "priority",
                value: row.priority.clone(),
                file: file.to_string(),
                line,
            })?;
        let required = parse_flag(&row.required).ok_or_else(|| StandardsError::InvalidValue {
            field: "required",
            value: row.required.clone(),
            file: file.to_string(),
            line,
        })?;

        let name = row.field.trim().to_string();
        let synonyms: Vec<String> = row
            .synonyms
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let entry = match grouped.iter_mut().position(|g| g.id == id) {
            Some(index) => &mut grouped[index],
            None => {
                grouped.push(SchemaRows {
                    id: id.clone(),
                    shape,
                    priority,
                    fields: Vec::new(),
                    required: Vec::new(),
                });
                let last = grouped.len() - 1;
                &mut grouped[last]
            }
        };
        if entry.shape != shape {
            return Err(StandardsError::Inconsistent {
                schema: id,
                attribute: "shape",
                file: file.to_string(),
            });
        }
        if entry.priority != priority {
            return Err(StandardsError::Inconsistent {
                schema: id,
                attribute: "priority",
                file: file.to_string(),
            });
        }
        if required {
            entry.required.push(name.clone());
        }
        entry.fields.push(FieldSpec::new(name, synonyms));
    }

    grouped.into_iter().map(build_schema).collect()
}

fn build_schema(rows: SchemaRows) -> Result<SchemaDefinition> {
    if rows.required.is_empty() {
        return Err(StandardsError::NoRequiredField { schema: rows.id });
    }
    Ok(SchemaDefinition::new(
        rows.id,
        rows.shape,
        rows.priority,
        rows.fields,
        rows.required,
    )?)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "Y" | "YES" | "TRUE" | "1" => Some(true),
        "N" | "NO" | "FALSE" | "0" | "" => Some(false),
        _ => None,
    }
}
