//! Driven port for uploaded media.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by blob storage adapters.
    pub enum BlobStorageError {
        /// The storage path was refused.
        InvalidPath { path: String } => "invalid storage path: {path}",
        /// Writing the object failed.
        Io { message: String } => "blob storage write failed: {message}",
    }
}

/// Object storage returning public URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store `bytes` at `path` and return the public URL.
    async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, BlobStorageError>;
}
