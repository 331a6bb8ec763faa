//! Schema definitions for roster exports.
//!
//! This crate provides:
//!
//! - **Embedded schema table** compiled in from `data/schemas.csv`
//! - **Loader** turning the table into typed [`SchemaDefinition`]s
//! - **Registry** shared process-wide, read-only after first use
//!
//! # Example
//!
//! ```rust,ignore
//! use roster_standards::{registry, USAGE_EXPORT};
//!
//! let usage = registry().get(USAGE_EXPORT).unwrap();
//! println!("{} has {} fields", usage.id, usage.fields.len());
//! ```
//!
//! [`SchemaDefinition`]: roster_model::SchemaDefinition

pub mod embedded;
pub mod error;
pub mod loader;
pub mod registry;

pub use error::{Result, StandardsError};
pub use loader::load_schemas_from_str;
pub use registry::{LICENSE_EXPORT, ROLE_EXPORT, SchemaRegistry, USAGE_EXPORT, registry};
