//! Data sheet selection for multi-sheet workbooks.

/// Sheet name that always wins when present (compared trimmed and case-folded).
pub const PREFERRED_SHEET: &str = "o-licencias";

/// Picks the index of the sheet holding the data.
///
/// A sheet named like [`PREFERRED_SHEET`] wins wherever it sits; otherwise
/// the second sheet when there are two or more, else the first. Returns
/// `None` for a workbook without sheets.
pub fn select_sheet<S: AsRef<str>>(names: &[S]) -> Option<usize> {
    if let Some(index) = names
        .iter()
        .position(|name| name.as_ref().trim().to_lowercase() == PREFERRED_SHEET)
    {
        return Some(index);
    }
    match names.len() {
        0 => None,
        1 => Some(0),
        _ => Some(1),
    }
}
