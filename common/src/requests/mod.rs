use crate::model::variable::VariableDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request payload for `POST /api/generate-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEmailRequest {
    /// The operator's free-text instruction.
    pub prompt: String,
    /// Variables the model may use, listed in the prompt with their examples.
    #[serde(default)]
    pub variables: Vec<VariableDescriptor>,
    /// Order context. Kept as a loose JSON object: absent fields are
    /// interpolated as empty strings rather than rejected.
    #[serde(default)]
    pub order_details: Map<String, Value>,
}

/// One event of the relay stream: `data: {"content": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    pub content: String,
}

/// Error body returned by the relay when the upstream call fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
