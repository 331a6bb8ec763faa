//! Process-wide schema registry.
//!
//! The registry is built once from the embedded table and never mutated,
//! so concurrent readers share it without locking.

use std::sync::LazyLock;

use roster_model::{SchemaDefinition, SourceShape};

use crate::embedded;
use crate::error::Result;
use crate::loader::load_schemas_from_str;

/// Workbook export of license assignments.
pub const LICENSE_EXPORT: &str = "LicenseExport";
/// Delimited export of user roles.
pub const ROLE_EXPORT: &str = "RoleExport";
/// Delimited export of user activity.
pub const USAGE_EXPORT: &str = "UsageExport";

static DEFAULT_REGISTRY: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    SchemaRegistry::from_csv(embedded::SCHEMAS_CSV, embedded::SCHEMAS_FILE)
        .unwrap_or_else(|error| panic!("embedded schema table is invalid: {error}"))
});

/// Returns the built-in registry.
///
/// # Panics
///
/// Panics on first access if the embedded schema table fails to load.
pub fn registry() -> &'static SchemaRegistry {
    &DEFAULT_REGISTRY
}

/// Immutable collection of schema definitions.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<SchemaDefinition>,
}

impl SchemaRegistry {
    pub fn new(schemas: Vec<SchemaDefinition>) -> Self {
        Self { schemas }
    }

    /// Build a registry from schema table CSV text.
    pub fn from_csv(content: &str, file: &str) -> Result<Self> {
        Ok(Self::new(load_schemas_from_str(content, file)?))
    }

    pub fn get(&self, id: &str) -> Option<&SchemaDefinition> {
        self.schemas.iter().find(|s| s.id == id)
    }

    pub fn schemas(&self) -> &[SchemaDefinition] {
        &self.schemas
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|s| s.id.as_str())
    }

    /// Schemas for one decoding path, in disambiguation order.
    ///
    /// Ties on priority keep table order.
    pub fn for_shape(&self, shape: SourceShape) -> Vec<&SchemaDefinition> {
        let mut matching: Vec<&SchemaDefinition> =
            self.schemas.iter().filter(|s| s.shape == shape).collect();
        matching.sort_by_key(|s| s.priority);
        matching
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
