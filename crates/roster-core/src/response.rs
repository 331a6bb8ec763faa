//! Success envelope.

use serde::Serialize;

use roster_model::NormalizedRecord;

/// Decoding path reported in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Workbook input.
    Excel,
    Csv,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::Csv => "csv",
        }
    }
}

/// `{"type": "excel" | "csv", "data": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadResponse {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    pub data: Vec<NormalizedRecord>,
}
