//! Table rendering for `schemas` and `inspect`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_core::Normalized;
use roster_model::{MatchKind, SchemaDefinition};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per field of every schema.
pub fn schemas_table(schemas: &[SchemaDefinition]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Schema"),
        header_cell("Shape"),
        header_cell("Priority"),
        header_cell("Field"),
        header_cell("Required"),
        header_cell("Synonyms"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for schema in schemas {
        for (index, field) in schema.fields.iter().enumerate() {
            let (id, shape, priority) = if index == 0 {
                (
                    Cell::new(&schema.id).add_attribute(Attribute::Bold),
                    Cell::new(schema.shape),
                    Cell::new(schema.priority),
                )
            } else {
                (Cell::new(""), Cell::new(""), Cell::new(""))
            };
            table.add_row(vec![
                id,
                shape,
                priority,
                Cell::new(&field.name),
                required_cell(schema.is_required(&field.name)),
                dim_cell(field.synonyms.join(", ")),
            ]);
        }
    }
    table
}

/// Per-field mapping of a resolved input.
pub fn mapping_table(normalized: &Normalized<'_>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Required"),
        header_cell("Column"),
        header_cell("Header"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);

    let schema = normalized.schema;
    for (field, mapped) in normalized.mapping.in_schema_order(schema) {
        let required = schema.is_required(field);
        let row = match mapped {
            Some(column) => vec![
                Cell::new(field),
                required_cell(required),
                Cell::new(&column.column),
                Cell::new(&column.header),
                match_cell(column.kind),
            ],
            None => vec![
                Cell::new(field),
                required_cell(required),
                dim_cell("-"),
                dim_cell("-"),
                if required {
                    Cell::new("missing").fg(Color::Red)
                } else {
                    dim_cell("unmapped")
                },
            ],
        };
        table.add_row(row);
    }
    table
}

/// Plain-text report printed by `inspect`.
pub fn inspection_report(normalized: &Normalized<'_>) -> String {
    let header_row = normalized
        .header_row
        .map_or_else(|| "-".to_string(), |row| row.to_string());
    format!(
        "Type: {}\nSchema: {}\nHeader row: {}\nRequired fields present: {}\nRecords: {}\n{}",
        normalized.kind.as_str(),
        normalized.schema.id,
        header_row,
        if normalized.satisfied { "yes" } else { "no" },
        normalized.records.len(),
        mapping_table(normalized)
    )
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("yes").fg(Color::Yellow)
    } else {
        dim_cell("")
    }
}

fn match_cell(kind: MatchKind) -> Cell {
    match kind {
        MatchKind::Exact => Cell::new(kind).fg(Color::Green),
        MatchKind::Fuzzy => Cell::new(kind).fg(Color::Yellow),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}
