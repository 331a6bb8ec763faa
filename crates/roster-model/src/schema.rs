use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Which decoding path a schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceShape {
    /// Workbook sheets: positional cells, header row located by scanning.
    Grid,
    /// Delimited text: rows keyed by a leading header line.
    Records,
}

impl SourceShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceShape::Grid => "grid",
            SourceShape::Records => "records",
        }
    }
}

impl fmt::Display for SourceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceShape {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(SourceShape::Grid),
            "records" | "record" => Ok(SourceShape::Records),
            other => Err(ModelError::UnknownShape(other.to_string())),
        }
    }
}

/// One logical field and the spellings accepted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Accepted spellings, compared only after normalization. Kept in
    /// authoring order with duplicates removed.
    pub synonyms: Vec<String>,
}

impl FieldSpec {
    pub fn new<I, S>(name: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let synonyms = synonyms
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| seen.insert(s.clone()))
            .collect();
        Self {
            name: name.into(),
            synonyms,
        }
    }
}

/// A named target record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub id: String,
    pub shape: SourceShape,
    /// Disambiguation order among schemas of the same shape; lower runs first.
    pub priority: u32,
    pub fields: Vec<FieldSpec>,
    pub required: BTreeSet<String>,
}

impl SchemaDefinition {
    /// Validates and builds a schema definition.
    ///
    /// Field names must be non-empty and unique, and every required name
    /// must be a declared field.
    pub fn new(
        id: impl Into<String>,
        shape: SourceShape,
        priority: u32,
        fields: Vec<FieldSpec>,
        required: impl IntoIterator<Item = String>,
    ) -> Result<Self> {
        let id = id.into();
        let mut names = BTreeSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(ModelError::EmptyFieldName { schema: id });
            }
            if !names.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    schema: id,
                    field: field.name.clone(),
                });
            }
        }
        let required: BTreeSet<String> = required.into_iter().collect();
        if let Some(unknown) = required.iter().find(|r| !names.contains(r.as_str())) {
            return Err(ModelError::UnknownRequiredField {
                schema: id,
                field: unknown.clone(),
            });
        }
        Ok(Self {
            id,
            shape,
            priority,
            fields,
            required,
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Required fields in declared field order.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| self.required.contains(&f.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> FieldSpec {
        FieldSpec::new(name, [name])
    }

    #[test]
    fn rejects_duplicate_fields() {
        let err = SchemaDefinition::new(
            "Dup",
            SourceShape::Records,
            0,
            vec![field("login"), field("login")],
            vec!["login".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateField { .. }));
    }

    #[test]
    fn rejects_unknown_required_field() {
        let err = SchemaDefinition::new(
            "Bad",
            SourceShape::Grid,
            0,
            vec![field("mail")],
            vec!["login".to_string()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownRequiredField {
                schema: "Bad".to_string(),
                field: "login".to_string()
            }
        );
    }

    #[test]
    fn synonyms_are_deduplicated_in_order() {
        let spec = FieldSpec::new("proyecto", ["proyecto", "proyectos", "proyecto"]);
        assert_eq!(spec.synonyms, vec!["proyecto", "proyectos"]);
    }

    #[test]
    fn shape_parses_case_insensitively() {
        assert_eq!("Grid".parse::<SourceShape>().unwrap(), SourceShape::Grid);
        assert_eq!(" records ".parse::<SourceShape>().unwrap(), SourceShape::Records);
        assert!("sheet".parse::<SourceShape>().is_err());
    }

    #[test]
    fn required_fields_follow_declared_order() {
        let schema = SchemaDefinition::new(
            "RoleExport",
            SourceShape::Records,
            0,
            vec![field("login"), field("name"), field("role")],
            vec!["role".to_string(), "login".to_string()],
        )
        .unwrap();
        let required: Vec<&str> = schema.required_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(required, vec!["login", "role"]);
        assert!(schema.is_required("role"));
        assert!(!schema.is_required("name"));
    }
}
