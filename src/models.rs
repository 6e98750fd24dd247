use serde::{Deserialize, Serialize};

/// The caller wraps each request field in a `{"value": ...}` envelope.
/// That shape is their wire contract; we preserve it rather than flatten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldValue {
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAdRequest {
    pub document_id: FieldValue,
    pub location: FieldValue,
    pub fda: FieldValue,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAdResponse {
    pub title: String,
    pub summary: String,
}
