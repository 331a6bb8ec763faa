//! Record projection.

use roster_model::{CellValue, ColumnId, ColumnMapping, NormalizedRecord, RecordRow, SchemaDefinition};

/// A raw row that can be read through a [`ColumnId`].
pub trait CellSource {
    /// Returns the projected value of `column`, or `None` when the cell is
    /// missing or falsy.
    fn read(&self, column: &ColumnId) -> Option<String>;
}

impl CellSource for [CellValue] {
    fn read(&self, column: &ColumnId) -> Option<String> {
        match column {
            ColumnId::Index(index) => self
                .get(*index)
                .filter(|cell| !cell.is_falsy())
                .map(CellValue::render),
            ColumnId::Header(_) => None,
        }
    }
}

impl CellSource for Vec<CellValue> {
    fn read(&self, column: &ColumnId) -> Option<String> {
        self.as_slice().read(column)
    }
}

impl CellSource for RecordRow {
    fn read(&self, column: &ColumnId) -> Option<String> {
        match column {
            ColumnId::Header(header) => self
                .get(header)
                .filter(|value| !value.is_empty())
                .cloned(),
            ColumnId::Index(_) => None,
        }
    }
}

/// Applies `mapping` to every row.
///
/// Each record carries exactly the fields of `schema` in declared order.
/// Unmapped fields and missing or falsy cells become `""`.
pub fn project<R: CellSource>(
    rows: &[R],
    mapping: &ColumnMapping,
    schema: &SchemaDefinition,
) -> Vec<NormalizedRecord> {
    let columns: Vec<(&str, Option<&ColumnId>)> = mapping
        .in_schema_order(schema)
        .map(|(field, mapped)| (field, mapped.map(|m| &m.column)))
        .collect();

    rows.iter()
        .map(|row| {
            let mut record = NormalizedRecord::empty(schema);
            for (field, column) in &columns {
                if let Some(value) = column.and_then(|c| row.read(c)) {
                    record.set(field, value);
                }
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use roster_model::{FieldSpec, MappedColumn, MatchKind, SourceShape};

    use super::*;

    fn role_schema() -> SchemaDefinition {
        SchemaDefinition::new(
            "RoleExport",
            SourceShape::Records,
            0,
            vec![
                FieldSpec::new("login", ["login"]),
                FieldSpec::new("name", ["name"]),
                FieldSpec::new("role", ["role"]),
            ],
            vec!["login".to_string(), "role".to_string()],
        )
        .unwrap()
    }

    fn at(column: ColumnId) -> MappedColumn {
        MappedColumn {
            header: column.to_string(),
            column,
            kind: MatchKind::Exact,
        }
    }

    #[test]
    fn grid_rows_read_by_index() {
        let mut mapping = ColumnMapping::new();
        mapping.insert("login", at(ColumnId::Index(1)));
        mapping.insert("role", at(ColumnId::Index(3)));
        let rows = vec![
            vec![
                CellValue::Int(7),
                CellValue::from("alice"),
                CellValue::Empty,
                CellValue::from("admin"),
            ],
            vec![CellValue::Empty, CellValue::from("bob")],
        ];
        let records = project(&rows, &mapping, &role_schema());
        assert_eq!(records[0].get("login"), Some("alice"));
        assert_eq!(records[0].get("name"), Some(""));
        assert_eq!(records[0].get("role"), Some("admin"));
        assert_eq!(records[1].get("role"), Some(""));
    }

    #[test]
    fn falsy_grid_cells_become_empty() {
        let mut mapping = ColumnMapping::new();
        mapping.insert("login", at(ColumnId::Index(0)));
        mapping.insert("name", at(ColumnId::Index(1)));
        mapping.insert("role", at(ColumnId::Index(2)));
        let rows = vec![vec![
            CellValue::Int(0),
            CellValue::Bool(false),
            CellValue::Float(2.5),
        ]];
        let records = project(&rows, &mapping, &role_schema());
        assert_eq!(records[0].get("login"), Some(""));
        assert_eq!(records[0].get("name"), Some(""));
        assert_eq!(records[0].get("role"), Some("2.5"));
    }

    #[test]
    fn keyed_rows_read_by_header() {
        let mut mapping = ColumnMapping::new();
        mapping.insert("login", at(ColumnId::Header("Login".to_string())));
        let mut row = RecordRow::new();
        row.insert("Login".to_string(), "carol".to_string());
        row.insert("Extra".to_string(), "ignored".to_string());
        let records = project(&[row], &mapping, &role_schema());
        let keys: Vec<&str> = records[0].keys().collect();
        assert_eq!(keys, vec!["login", "name", "role"]);
        assert_eq!(records[0].get("login"), Some("carol"));
    }

    #[test]
    fn no_rows_no_records() {
        let rows: Vec<RecordRow> = Vec::new();
        assert!(project(&rows, &ColumnMapping::new(), &role_schema()).is_empty());
    }
}
