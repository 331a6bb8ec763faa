//! Schema selection for keyed rows.

use tracing::{debug, info, warn};

use roster_model::{ColumnMapping, SchemaDefinition};

use crate::mapper::map_headers;

/// The schema chosen for a record set and the mapping computed against it.
#[derive(Debug, Clone)]
pub struct Resolution<'s> {
    pub schema: &'s SchemaDefinition,
    pub mapping: ColumnMapping,
    /// False when no candidate's required fields were satisfied and the
    /// last candidate was used as a fallback.
    pub satisfied: bool,
}

impl Resolution<'_> {
    /// Required fields of the chosen schema that stayed unmapped.
    pub fn missing_required(&self) -> Vec<String> {
        self.mapping.missing_required(self.schema)
    }
}

/// Tries `candidates` in order and returns the first whose required fields
/// all map onto `headers`.
///
/// When none qualifies, the last candidate is returned anyway with
/// `satisfied == false`. Returns `None` only for an empty candidate list.
pub fn disambiguate<'s>(
    candidates: &[&'s SchemaDefinition],
    headers: &[String],
) -> Option<Resolution<'s>> {
    let mut last = None;

    for &schema in candidates {
        let mapping = map_headers(schema, headers);
        if mapping.satisfies(schema) {
            info!(schema = %schema.id, mapped = mapping.len(), "schema selected");
            return Some(Resolution {
                schema,
                mapping,
                satisfied: true,
            });
        }
        debug!(
            schema = %schema.id,
            missing = %mapping.missing_required(schema).join(","),
            "schema rejected"
        );
        last = Some((schema, mapping));
    }

    let (schema, mapping) = last?;
    warn!(
        schema = %schema.id,
        missing = %mapping.missing_required(schema).join(","),
        "no schema satisfied its required fields, falling back to last candidate"
    );
    Some(Resolution {
        schema,
        mapping,
        satisfied: false,
    })
}
