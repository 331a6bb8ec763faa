//! Canonical header form.

use roster_model::CellValue;

/// Lower-cases `raw` and drops every whitespace and underscore character.
///
/// `"Last Authenticated At"`, `"last_authenticated_at"` and
/// `"lastauthenticatedat"` all normalize to `"lastauthenticatedat"`.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalizes a grid cell. Only text cells carry a header; every other
/// cell kind normalizes to the empty string.
pub fn normalize_cell(cell: &CellValue) -> String {
    cell.as_text().map(normalize).unwrap_or_default()
}
