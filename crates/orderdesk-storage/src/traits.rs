//! Storage abstraction trait
//!
//! This module defines the Storage trait that storage backends implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction for submitted order images.
///
/// The handler works against this trait object so tests can substitute an
/// isolated instance without touching the production upload root.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist a file under the given key, durably, and return its
    /// public-facing reference path.
    async fn store(&self, key: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Whether a previously stored key exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Remove a stored file. Missing keys are not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
