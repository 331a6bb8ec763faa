//! Mapping engine tests against the built-in schemas.

use roster_map::{
    HeaderLocator, LocateError, disambiguate, map_headers, normalize, project, select_sheet,
};
use roster_model::{CellValue, MatchKind, RawGrid, RawRecordSet, SourceShape};
use roster_standards::{LICENSE_EXPORT, ROLE_EXPORT, USAGE_EXPORT, registry};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn cells(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::from(*v)).collect()
}

#[test]
fn normalized_spellings_agree() {
    let a = normalize("Last Authenticated At");
    assert_eq!(a, normalize("lastauthenticatedat"));
    assert_eq!(a, normalize("last_authenticated_at"));
}

#[test]
fn login_and_role_select_role_export() {
    let candidates = registry().for_shape(SourceShape::Records);
    let headers = strings(&["login", "role"]);
    let resolution = disambiguate(&candidates, &headers).expect("candidates");
    assert_eq!(resolution.schema.id, ROLE_EXPORT);
    assert!(resolution.satisfied);

    let set = RawRecordSet::from_rows(headers, vec![strings(&["alice", "admin"])]);
    let records = project(&set.rows, &resolution.mapping, resolution.schema);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("login"), Some("alice"));
    assert_eq!(records[0].get("name"), Some(""));
    assert_eq!(records[0].get("role"), Some("admin"));
}

#[test]
fn activity_headers_select_usage_export() {
    let candidates = registry().for_shape(SourceShape::Records);
    let headers = strings(&[
        "Login",
        "Last Authenticated At",
        "Last Activity At",
        "Last Surface Used",
    ]);
    let resolution = disambiguate(&candidates, &headers).expect("candidates");
    assert_eq!(resolution.schema.id, USAGE_EXPORT);
    assert!(resolution.satisfied);
    assert_eq!(resolution.mapping.len(), 4);
    assert_eq!(resolution.mapping.exact_count(), 4);
}

#[test]
fn unmatched_headers_fall_back_to_last_candidate() {
    let candidates = registry().for_shape(SourceShape::Records);
    let headers = strings(&["Email", "Department"]);
    let resolution = disambiguate(&candidates, &headers).expect("candidates");
    assert_eq!(resolution.schema.id, USAGE_EXPORT);
    assert!(!resolution.satisfied);
    assert_eq!(resolution.missing_required(), vec!["login"]);
}

#[test]
fn camel_case_headers_match_spaced_synonyms_exactly() {
    let usage = registry().get(USAGE_EXPORT).unwrap();
    let mapping = map_headers(usage, &strings(&["login", "lastActivityAt"]));
    assert_eq!(mapping.get("lastActivityAt").unwrap().kind, MatchKind::Exact);
}

#[test]
fn bare_nombre_title_row_is_not_the_license_header() {
    let license = registry().get(LICENSE_EXPORT).unwrap();
    let grid = RawGrid::new(vec![
        cells(&["Nombre"]),
        cells(&["Mail", "Nombre Completo"]),
        cells(&["ana@x.com", "Ana"]),
    ]);
    let found = HeaderLocator::default().locate(&grid, license).unwrap();
    assert_eq!(found.row_index, 1);

    let records = project(found.data_rows(&grid), &found.mapping, license);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("mail"), Some("ana@x.com"));
    assert_eq!(records[0].get("nombre"), Some("Ana"));
}

#[test]
fn permuting_columns_does_not_change_records() {
    let usage = registry().get(USAGE_EXPORT).unwrap();

    let headers = strings(&["Login", "Last Activity At", "Last Surface Used"]);
    let row = strings(&["bob", "2024-01-02", "web"]);
    let set = RawRecordSet::from_rows(headers.clone(), vec![row.clone()]);
    let original = project(&set.rows, &map_headers(usage, &headers), usage);

    let permuted_headers = vec![headers[2].clone(), headers[0].clone(), headers[1].clone()];
    let permuted_row = vec![row[2].clone(), row[0].clone(), row[1].clone()];
    let permuted_set = RawRecordSet::from_rows(permuted_headers.clone(), vec![permuted_row]);
    let permuted = project(
        &permuted_set.rows,
        &map_headers(usage, &permuted_headers),
        usage,
    );

    assert_eq!(original, permuted);
}

#[test]
fn permuting_grid_columns_does_not_change_records() {
    let license = registry().get(LICENSE_EXPORT).unwrap();
    let grid = RawGrid::new(vec![
        cells(&["Mail", "Empresa", "Fecha de Alta"]),
        cells(&["a@x.com", "ACME", "2024-03-01"]),
    ]);
    let permuted = RawGrid::new(vec![
        cells(&["Fecha de Alta", "Mail", "Empresa"]),
        cells(&["2024-03-01", "a@x.com", "ACME"]),
    ]);
    let locator = HeaderLocator::default();
    let a = locator.locate(&grid, license).unwrap();
    let b = locator.locate(&permuted, license).unwrap();
    assert_eq!(
        project(a.data_rows(&grid), &a.mapping, license),
        project(b.data_rows(&permuted), &b.mapping, license)
    );
}

#[test]
fn license_header_found_on_third_row() {
    let license = registry().get(LICENSE_EXPORT).unwrap();
    let grid = RawGrid::new(vec![
        cells(&["Reporte mensual", ""]),
        cells(&["Generado", "2024-05-01"]),
        cells(&["Mail", "Nombre Completo", "Licencia", "Proyectos"]),
        cells(&["ana@x.com", "Ana Ruiz", "E3", "Alpha"]),
        cells(&["luis@x.com", "Luis Gil", "E5", ""]),
    ]);
    let found = HeaderLocator::default().locate(&grid, license).unwrap();
    assert_eq!(found.row_index, 2);

    let records = project(found.data_rows(&grid), &found.mapping, license);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("mail"), Some("ana@x.com"));
    assert_eq!(records[0].get("nombre"), Some("Ana Ruiz"));
    assert_eq!(records[0].get("proyecto"), Some("Alpha"));
    assert_eq!(records[0].get("estado"), Some(""));
    assert_eq!(records[1].get("licencia"), Some("E5"));
    assert_eq!(records[1].get("proyecto"), Some(""));
}

#[test]
fn grid_without_mail_is_rejected() {
    let license = registry().get(LICENSE_EXPORT).unwrap();
    let rows = (0..15)
        .map(|i| cells(&[format!("fila {i}").as_str(), "ACME"]))
        .collect();
    let err = HeaderLocator::default()
        .locate(&RawGrid::new(rows), license)
        .unwrap_err();
    assert!(matches!(err, LocateError::RequiredColumnMissing { ref missing, .. } if missing == &["mail"]));
    assert!(err.to_string().contains("mail"));
}

#[test]
fn sheet_selection_examples() {
    let names = strings(&["Sheet1", "O-Licencias", "Sheet3"]);
    assert_eq!(select_sheet(&names).map(|i| names[i].as_str()), Some("O-Licencias"));
    let names = strings(&["Sheet1", "Sheet2"]);
    assert_eq!(select_sheet(&names).map(|i| names[i].as_str()), Some("Sheet2"));
}
