use crate::AppState;
use crate::api::models::uploads::{UploadEvent, UploadReceipt};
use crate::errors::{ErrorBody, Result};
use crate::upload;
use axum::{Json, extract::State};

#[utoipa::path(
    post,
    path = "/v1/uploads",
    tag = "uploads",
    summary = "Store an upload",
    description = "Decode the event payload, derive a storage key from its content type, and store it in the configured bucket.",
    request_body = UploadEvent,
    responses(
        (status = 200, description = "Payload stored", body = UploadReceipt),
        (status = 413, description = "Decoded payload exceeds the size limit", body = ErrorBody),
        (status = 500, description = "Missing bucket configuration or storage failure", body = ErrorBody)
    )
)]
pub async fn handle_upload(State(state): State<AppState>, Json(event): Json<UploadEvent>) -> Result<Json<UploadReceipt>> {
    let receipt = upload::process_upload(event, state.store.as_ref(), &state.config).await?;
    Ok(Json(receipt))
}

#[cfg(test)]
mod tests {
    use crate::Application;
    use crate::api::models::uploads::UploadReceipt;
    use crate::config::Config;
    use crate::errors::ErrorBody;
    use crate::storage::{MemoryStore, ObjectStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;

    fn test_config() -> Config {
        Config {
            bucket: Some("uploads-test".to_string()),
            ..Config::default()
        }
    }

    fn server_with(config: Config, store: Arc<dyn ObjectStore>) -> TestServer {
        Application::new_with_store(config, store)
            .expect("Failed to create application")
            .into_test_server()
    }

    #[test_log::test(tokio::test)]
    async fn upload_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let server = server_with(test_config(), store.clone());

        let response = server
            .post("/v1/uploads")
            .json(&json!({
                "body": "aGVsbG8=",
                "isBase64Encoded": true,
                "headers": { "content-type": "text/plain" }
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");

        let receipt: UploadReceipt = response.json();
        assert_eq!(receipt.size, 5);
        assert_eq!(receipt.bucket, "uploads-test");
        assert!(receipt.filename.starts_with("uploads/"));
        assert!(receipt.filename.ends_with(".txt"));
        assert_eq!(store.write_count(), 1);
        assert_eq!(&store.objects()[0].body[..], b"hello");
    }

    #[test_log::test(tokio::test)]
    async fn headerless_upload_defaults_to_binary() {
        let store = Arc::new(MemoryStore::new());
        let server = server_with(test_config(), store.clone());

        let response = server.post("/v1/uploads").json(&json!({ "body": "data" })).await;

        response.assert_status_ok();
        let receipt: UploadReceipt = response.json();
        assert_eq!(receipt.size, 4);
        assert!(receipt.filename.ends_with(".bin"));
        assert_eq!(store.objects()[0].content_type, "application/octet-stream");
    }

    #[test_log::test(tokio::test)]
    async fn oversized_upload_is_rejected_with_413() {
        let store = Arc::new(MemoryStore::new());
        let mut config = test_config();
        config.upload.max_payload_bytes = 1024;
        let server = server_with(config, store.clone());

        let response = server.post("/v1/uploads").json(&json!({ "body": "x".repeat(1025) })).await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        let body: ErrorBody = response.json();
        assert!(body.error.contains("too large"));
        assert_eq!(store.write_count(), 0);
    }

    #[test_log::test(tokio::test)]
    async fn missing_bucket_is_a_configuration_error() {
        let store = Arc::new(MemoryStore::new());
        let server = server_with(Config::default(), store.clone());

        let response = server.post("/v1/uploads").json(&json!({ "body": "data" })).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = response.json();
        assert!(body.error.contains("bucket"));
        assert_eq!(store.write_count(), 0);
    }

    #[test_log::test(tokio::test)]
    async fn store_failures_surface_as_internal_errors() {
        struct FailingStore;

        #[async_trait::async_trait]
        impl ObjectStore for FailingStore {
            async fn put_object(
                &self,
                _bucket: &str,
                _key: &str,
                _body: bytes::Bytes,
                _content_type: &str,
                _metadata: std::collections::HashMap<String, String>,
            ) -> anyhow::Result<()> {
                anyhow::bail!("connection reset")
            }
        }

        let server = server_with(test_config(), Arc::new(FailingStore));

        let response = server.post("/v1/uploads").json(&json!({ "body": "data" })).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = response.json();
        assert!(body.error.starts_with("Upload failed:"));
    }

    #[test_log::test(tokio::test)]
    async fn healthz_responds() {
        let server = server_with(test_config(), Arc::new(MemoryStore::new()));

        let response = server.get("/healthz").await;

        response.assert_status_ok();
        response.assert_text("OK");
    }
}
