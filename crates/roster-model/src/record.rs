use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::SchemaDefinition;

/// A projected output row.
///
/// The key set is exactly the owning schema's field list, in declared
/// order; unmapped fields hold the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    values: Vec<(String, String)>,
}

impl NormalizedRecord {
    /// Starts a record for `schema` with every field set to `""`.
    pub fn empty(schema: &SchemaDefinition) -> Self {
        Self {
            values: schema
                .fields
                .iter()
                .map(|f| (f.name.clone(), String::new()))
                .collect(),
        }
    }

    /// Sets a field value. Unknown field names are ignored so the key set
    /// never grows beyond the schema.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        if let Some((_, slot)) = self.values.iter_mut().find(|(name, _)| name == field) {
            *slot = value.into();
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
