//! Roster export normalization pipeline.
//!
//! Decoded input goes in, normalized records come out:
//!
//! ```rust,ignore
//! use roster_core::{PipelineOptions, read_file};
//!
//! let response = read_file(path, Some("usuarios.csv"), &PipelineOptions::default())?;
//! println!("{}", serde_json::to_string(&response)?);
//! ```

pub mod error;
pub mod options;
pub mod pipeline;
pub mod read;
pub mod response;

pub use error::{ErrorBody, PipelineError, Result, StatusClass};
pub use options::PipelineOptions;
pub use pipeline::{DecodedInput, Normalized, Pipeline};
pub use read::{decode_file, inspect_file, read_file};
pub use response::{ReadResponse, ResponseType};
