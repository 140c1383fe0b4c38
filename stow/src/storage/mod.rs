//! Object storage backends.
//!
//! The upload path talks to storage through the [`ObjectStore`] trait so the
//! handler runs against S3 in production and an in-memory store in tests,
//! without a live network dependency.

pub mod memory;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

pub use memory::MemoryStore;
pub use s3::S3Store;

/// A blob store addressed by (bucket, key).
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Store one object with its content type and attribute map.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> anyhow::Result<()>;
}
