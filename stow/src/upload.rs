//! Core upload transform.
//!
//! One invocation decodes the payload, resolves a content type, derives a
//! storage key, enforces the size ceiling, and performs a single write to the
//! object store. There is no retained state between invocations; concurrent
//! invocations each compute their own timestamp/identifier pair.

use crate::api::models::uploads::{UploadEvent, UploadReceipt};
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::storage::ObjectStore;
use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// Content type assumed when the request carries no content-type header.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Ordered (content-type fragment, extension) pairs.
///
/// Matching is substring-based so parameterized values like
/// "text/plain; charset=utf-8" still classify; first match wins. Suffix types
/// such as "application/jsonpatch+json" therefore classify by the fragment
/// they contain.
const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("text/plain", "txt"),
    ("application/pdf", "pdf"),
    ("application/json", "json"),
];

/// Pick a file extension for a content type, falling back to "bin".
fn extension_for(content_type: &str) -> &'static str {
    EXTENSION_TABLE
        .iter()
        .find(|(fragment, _)| content_type.contains(fragment))
        .map(|(_, ext)| *ext)
        .unwrap_or("bin")
}

/// Case-insensitive content-type lookup with the generic binary default.
fn content_type_from_headers(headers: &HashMap<String, String>) -> String {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.clone())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}

/// Decode the event payload into bytes.
///
/// Base64-flagged bodies are decoded; everything else is taken as the UTF-8
/// bytes of the body string.
fn decode_body(event: &UploadEvent) -> Result<Bytes> {
    if event.is_base64_encoded {
        let decoded = BASE64
            .decode(event.body.as_bytes())
            .context("failed to decode base64 payload")?;
        Ok(Bytes::from(decoded))
    } else {
        Ok(Bytes::copy_from_slice(event.body.as_bytes()))
    }
}

/// Timestamp/identifier pair naming one stored object.
#[derive(Debug, Clone)]
struct UploadStamp {
    timestamp: String,
    file_id: String,
}

impl UploadStamp {
    fn generate() -> Self {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        // First 8 hex chars of a v4 UUID. Collisions within the same second
        // are an accepted risk.
        let file_id = Uuid::new_v4().simple().to_string()[..8].to_string();
        Self { timestamp, file_id }
    }
}

/// Run one upload invocation end to end.
pub async fn process_upload(event: UploadEvent, store: &dyn ObjectStore, config: &Config) -> Result<UploadReceipt> {
    let Some(bucket) = config.bucket.as_deref() else {
        return Err(Error::BucketNotConfigured);
    };

    let body = decode_body(&event)?;
    let content_type = content_type_from_headers(&event.headers);

    let stamp = UploadStamp::generate();
    let filename = format!(
        "{}/{}_{}.{}",
        config.upload.key_prefix,
        stamp.timestamp,
        stamp.file_id,
        extension_for(&content_type)
    );

    let limit_bytes = config.upload.max_payload_bytes;
    if body.len() > limit_bytes {
        return Err(Error::PayloadTooLarge {
            size: body.len(),
            limit_bytes,
        });
    }

    let size = body.len();
    let metadata = HashMap::from([
        ("upload-timestamp".to_string(), stamp.timestamp.clone()),
        ("file-id".to_string(), stamp.file_id.clone()),
        ("original-size".to_string(), size.to_string()),
    ]);

    store.put_object(bucket, &filename, body, &content_type, metadata).await?;

    tracing::info!(
        filename = %filename,
        bucket = %bucket,
        size_bytes = size,
        content_type = %content_type,
        "Uploaded payload"
    );

    Ok(UploadReceipt {
        message: "File uploaded successfully".to_string(),
        filename,
        bucket: bucket.to_string(),
        size,
        upload_id: stamp.file_id,
        timestamp: stamp.timestamp,
    })
}
