//! Column mapping engine.
//!
//! Two passes over the observed headers:
//!
//! 1. **Exact**: a header whose normalized form equals a normalized synonym
//!    of a field maps that field. Headers are visited in source order, so
//!    when two headers match the same field the later one wins.
//! 2. **Fuzzy**: every field still unmapped takes the first header whose
//!    normalized form contains the field's normalized name.
//!
//! The mapper never fails; fields without a column are simply absent from
//! the returned [`ColumnMapping`].

use tracing::debug;

use roster_model::{CellValue, ColumnId, ColumnMapping, MappedColumn, MatchKind, SchemaDefinition};

use crate::normalize::{normalize, normalize_cell};

/// One observed header, already normalized.
struct Candidate {
    column: ColumnId,
    header: String,
    normalized: String,
}

/// Map the header strings of a record set (row-object input).
pub fn map_headers(schema: &SchemaDefinition, headers: &[String]) -> ColumnMapping {
    let candidates = headers
        .iter()
        .map(|header| Candidate {
            column: ColumnId::Header(header.clone()),
            header: header.clone(),
            normalized: normalize(header),
        })
        .collect::<Vec<_>>();
    map_candidates(schema, &candidates)
}

/// Map one grid row read as headers. Columns are identified by position.
pub fn map_cells(schema: &SchemaDefinition, cells: &[CellValue]) -> ColumnMapping {
    let candidates = cells
        .iter()
        .enumerate()
        .map(|(index, cell)| Candidate {
            column: ColumnId::Index(index),
            header: cell.render(),
            normalized: normalize_cell(cell),
        })
        .collect::<Vec<_>>();
    map_candidates(schema, &candidates)
}

fn map_candidates(schema: &SchemaDefinition, candidates: &[Candidate]) -> ColumnMapping {
    let synonyms: Vec<(&str, Vec<String>)> = schema
        .fields
        .iter()
        .map(|field| {
            let normalized = field.synonyms.iter().map(|s| normalize(s)).collect();
            (field.name.as_str(), normalized)
        })
        .collect();

    let mut mapping = ColumnMapping::new();

    for candidate in candidates {
        if candidate.normalized.is_empty() {
            continue;
        }
        for (field, forms) in &synonyms {
            if forms.iter().any(|form| *form == candidate.normalized) {
                let previous = mapping.insert(*field, mapped(candidate, MatchKind::Exact));
                if let Some(previous) = previous {
                    debug!(
                        schema = %schema.id,
                        field,
                        replaced = %previous.header,
                        header = %candidate.header,
                        "later header overrides exact match"
                    );
                }
            }
        }
    }

    for field in &schema.fields {
        if mapping.is_mapped(&field.name) {
            continue;
        }
        let canonical = normalize(&field.name);
        if canonical.is_empty() {
            continue;
        }
        if let Some(candidate) = candidates
            .iter()
            .find(|c| !c.normalized.is_empty() && c.normalized.contains(&canonical))
        {
            mapping.insert(field.name.clone(), mapped(candidate, MatchKind::Fuzzy));
        }
    }

    for (field, column) in mapping.in_schema_order(schema) {
        match column {
            Some(column) => debug!(
                schema = %schema.id,
                field,
                header = %column.header,
                column = %column.column,
                kind = %column.kind,
                "mapped field"
            ),
            None => debug!(schema = %schema.id, field, "field unmapped"),
        }
    }

    mapping
}

fn mapped(candidate: &Candidate, kind: MatchKind) -> MappedColumn {
    MappedColumn {
        column: candidate.column.clone(),
        header: candidate.header.clone(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use roster_model::{FieldSpec, SourceShape};

    use super::*;

    fn usage_schema() -> SchemaDefinition {
        SchemaDefinition::new(
            "UsageExport",
            SourceShape::Records,
            1,
            vec![
                FieldSpec::new("login", ["login"]),
                FieldSpec::new("lastAuthenticatedAt", ["last authenticated at"]),
                FieldSpec::new("lastActivityAt", ["last activity at"]),
                FieldSpec::new("lastSurfaceUsed", ["last surface used"]),
            ],
            vec!["login".to_string()],
        )
        .unwrap()
    }

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn exact_match_ignores_case_space_and_underscore() {
        let mapping = map_headers(
            &usage_schema(),
            &headers(&["LOGIN", "last_authenticated_at", "Last Activity At"]),
        );
        let login = mapping.get("login").unwrap();
        assert_eq!(login.column, ColumnId::Header("LOGIN".to_string()));
        assert_eq!(login.kind, MatchKind::Exact);
        assert_eq!(
            mapping.get("lastAuthenticatedAt").unwrap().header,
            "last_authenticated_at"
        );
        assert!(!mapping.is_mapped("lastSurfaceUsed"));
    }

    #[test]
    fn later_exact_header_wins() {
        let mapping = map_headers(&usage_schema(), &headers(&["Login", "login"]));
        assert_eq!(mapping.get("login").unwrap().header, "login");
    }

    #[test]
    fn fuzzy_fallback_uses_first_containing_header() {
        let mapping = map_headers(
            &usage_schema(),
            &headers(&["User Login Name", "Primary Login", "Last Surface Used (UTC)"]),
        );
        let login = mapping.get("login").unwrap();
        assert_eq!(login.header, "User Login Name");
        assert_eq!(login.kind, MatchKind::Fuzzy);
        let surface = mapping.get("lastSurfaceUsed").unwrap();
        assert_eq!(surface.header, "Last Surface Used (UTC)");
        assert_eq!(surface.kind, MatchKind::Fuzzy);
    }

    #[test]
    fn exact_match_beats_earlier_fuzzy_candidate() {
        let mapping = map_headers(&usage_schema(), &headers(&["Login Count", "Login"]));
        let login = mapping.get("login").unwrap();
        assert_eq!(login.header, "Login");
        assert_eq!(login.kind, MatchKind::Exact);
    }

    #[test]
    fn grid_cells_map_by_position() {
        let cells = vec![
            CellValue::Int(1),
            CellValue::Empty,
            CellValue::from("Last Activity At"),
            CellValue::from("Login"),
        ];
        let mapping = map_cells(&usage_schema(), &cells);
        assert_eq!(mapping.get("login").unwrap().column, ColumnId::Index(3));
        assert_eq!(
            mapping.get("lastActivityAt").unwrap().column,
            ColumnId::Index(2)
        );
        assert_eq!(mapping.exact_count(), 2);
    }

    #[test]
    fn empty_headers_never_match() {
        let mapping = map_headers(&usage_schema(), &headers(&["", "   ", "__"]));
        assert!(mapping.is_empty());
    }

    #[test]
    fn field_name_spelling_matches_when_listed_as_synonym() {
        let schema = SchemaDefinition::new(
            "UsageExport",
            SourceShape::Records,
            1,
            vec![FieldSpec::new(
                "lastAuthenticatedAt",
                ["last authenticated at", "lastAuthenticatedAt"],
            )],
            vec!["lastAuthenticatedAt".to_string()],
        )
        .unwrap();
        let mapping = map_headers(&schema, &headers(&["LastAuthenticatedAt"]));
        assert_eq!(
            mapping.get("lastAuthenticatedAt").unwrap().kind,
            MatchKind::Exact
        );
    }
}
