//! In-memory object store for tests and local runs.

use super::ObjectStore;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded write.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
    pub metadata: HashMap<String, String>,
}

/// Object store keeping everything in process memory.
///
/// Records every write so tests can assert on call counts and stored
/// attributes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<Vec<StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().expect("memory store lock poisoned").clone()
    }

    pub fn write_count(&self) -> usize {
        self.objects.lock().expect("memory store lock poisoned").len()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> anyhow::Result<()> {
        self.objects
            .lock()
            .expect("memory store lock poisoned")
            .push(StoredObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                body,
                content_type: content_type.to_string(),
                metadata,
            });
        Ok(())
    }
}
