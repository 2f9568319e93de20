use async_trait::async_trait;

use crate::core::error::Result;

/// Object storage for found-item images
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Build the full object key for a path inside the store
    fn generate_key(&self, path: &str) -> String {
        path.to_string()
    }

    /// Upload bytes under `key`, returning the stored key
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;

    /// Issue a time-limited URL granting read access to `key`
    async fn presigned_url(&self, key: &str, ttl_secs: u32) -> Result<String>;
}
