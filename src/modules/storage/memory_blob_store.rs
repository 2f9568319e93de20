use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::modules::storage::BlobStore;

#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-process blob store used by tests
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: RwLock<HashMap<String, StoredBlob>>,
    unavailable: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "Blob store unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        self.check_available()?;

        self.objects.write().await.insert(
            key.to_string(),
            StoredBlob {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(key.to_string())
    }

    async fn presigned_url(&self, key: &str, ttl_secs: u32) -> Result<String> {
        self.check_available()?;

        Ok(format!("memory://{}?expires_in={}", key, ttl_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_presign() {
        let store = MemoryBlobStore::new();
        let key = store
            .upload("found-1-bag.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        let blob = store.get(&key).await.unwrap();
        assert_eq!(blob.data, vec![1, 2, 3]);
        assert_eq!(blob.content_type, "image/png");
        assert_eq!(
            store.presigned_url(&key, 600).await.unwrap(),
            "memory://found-1-bag.png?expires_in=600"
        );
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = MemoryBlobStore::new();
        store.set_unavailable(true);
        assert!(store.upload("k", vec![], "image/png").await.is_err());
        assert!(store.presigned_url("k", 600).await.is_err());
        assert_eq!(store.object_count().await, 0);
    }
}
