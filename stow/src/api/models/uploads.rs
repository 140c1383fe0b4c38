use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Trigger event for one upload invocation.
///
/// Mirrors the proxy-integration event shape: the payload travels as a
/// string, base64-encoded for binary content.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadEvent {
    /// Raw or base64-encoded payload
    pub body: String,
    /// Whether `body` is base64-encoded
    #[serde(default)]
    pub is_base64_encoded: bool,
    /// Request headers; content-type is looked up case-insensitively
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Success response for a stored upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadReceipt {
    pub message: String,
    /// Object key the payload was stored under
    pub filename: String,
    pub bucket: String,
    /// Decoded payload size in bytes
    pub size: usize,
    pub upload_id: String,
    pub timestamp: String,
}
