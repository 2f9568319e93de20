//! Storage module for found-item images
//!
//! Provides the [`BlobStore`] abstraction, a MinIO/S3-compatible
//! implementation and an in-memory one for tests.

mod blob_store;
#[cfg(test)]
mod memory_blob_store;
mod minio_client;

pub use blob_store::BlobStore;
#[cfg(test)]
pub use memory_blob_store::MemoryBlobStore;
pub use minio_client::MinIOClient;
