use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Positional rows of cells decoded from a workbook sheet.
///
/// No row carries header semantics; the header row is located later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGrid {
    pub rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the grid.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// One keyed row of a [`RawRecordSet`].
pub type RecordRow = BTreeMap<String, String>;

/// Rows keyed by the header strings of a delimited file.
///
/// `headers` keeps source order; it is the iteration order used for
/// column matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecordSet {
    pub headers: Vec<String>,
    pub rows: Vec<RecordRow>,
}

impl RawRecordSet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Builds a record set by zipping each positional row with `headers`.
    ///
    /// A later header with the same text overwrites an earlier one in the
    /// row map; callers that need another collision policy rename headers
    /// before calling this.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut set = Self::new(headers);
        for row in rows {
            set.push_values(row);
        }
        set
    }

    pub fn push_row(&mut self, row: RecordRow) {
        self.rows.push(row);
    }

    /// Appends a positional row; missing trailing values are left out of the map.
    pub fn push_values(&mut self, values: Vec<String>) {
        let row = self
            .headers
            .iter()
            .cloned()
            .zip(values)
            .collect::<RecordRow>();
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_width_uses_widest_row() {
        let grid = RawGrid::new(vec![
            vec![CellValue::from("a")],
            vec![CellValue::from("a"), CellValue::Empty, CellValue::Int(1)],
        ]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.len(), 2);
        assert!(grid.row(2).is_none());
    }

    #[test]
    fn short_rows_omit_trailing_keys() {
        let set = RawRecordSet::from_rows(
            vec!["login".to_string(), "role".to_string()],
            vec![vec!["alice".to_string()]],
        );
        assert_eq!(set.rows[0].get("login").map(String::as_str), Some("alice"));
        assert!(!set.rows[0].contains_key("role"));
    }

    #[test]
    fn duplicate_headers_collapse_to_last_value() {
        let set = RawRecordSet::from_rows(
            vec!["login".to_string(), "login".to_string()],
            vec![vec!["first".to_string(), "second".to_string()]],
        );
        assert_eq!(set.rows[0].len(), 1);
        assert_eq!(set.rows[0]["login"], "second");
    }
}
