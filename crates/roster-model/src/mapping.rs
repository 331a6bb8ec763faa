//! Field-to-column mapping types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::SchemaDefinition;

/// Where a mapped field reads its value from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnId {
    /// Cell position within a grid row.
    Index(usize),
    /// Header key of a record-set row.
    Header(String),
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnId::Index(index) => write!(f, "#{index}"),
            ColumnId::Header(header) => f.write_str(header),
        }
    }
}

/// How a field was matched to its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Normalized header equals a normalized synonym.
    Exact,
    /// Normalized header contains the field's normalized name.
    Fuzzy,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved source column for one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedColumn {
    pub column: ColumnId,
    /// The header text as it appeared in the source.
    pub header: String,
    pub kind: MatchKind,
}

/// Field name to source column, computed once per file and reused for every row.
///
/// Fields without an entry are unmapped; absence is never an error here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    entries: BTreeMap<String, MappedColumn>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a match, replacing any earlier match for the same field.
    pub fn insert(&mut self, field: impl Into<String>, column: MappedColumn) -> Option<MappedColumn> {
        self.entries.insert(field.into(), column)
    }

    pub fn get(&self, field: &str) -> Option<&MappedColumn> {
        self.entries.get(field)
    }

    pub fn is_mapped(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields matched by synonym equality.
    pub fn exact_count(&self) -> usize {
        self.entries
            .values()
            .filter(|c| c.kind == MatchKind::Exact)
            .count()
    }

    /// Required fields of `schema` that have no column, in declared order.
    pub fn missing_required(&self, schema: &SchemaDefinition) -> Vec<String> {
        schema
            .required_fields()
            .filter(|f| !self.is_mapped(&f.name))
            .map(|f| f.name.clone())
            .collect()
    }

    pub fn satisfies(&self, schema: &SchemaDefinition) -> bool {
        schema.required_fields().all(|f| self.is_mapped(&f.name))
    }

    /// Mapped fields in the declared field order of `schema`.
    pub fn in_schema_order<'a>(
        &'a self,
        schema: &'a SchemaDefinition,
    ) -> impl Iterator<Item = (&'a str, Option<&'a MappedColumn>)> + 'a {
        schema
            .fields
            .iter()
            .map(move |f| (f.name.as_str(), self.entries.get(&f.name)))
    }
}
