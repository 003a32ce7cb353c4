//! Filesystem-backed blob storage for uploaded media.
//!
//! Objects are written beneath a single capability-scoped root directory via
//! `cap_std`, so a storage path can never escape it. Public URLs are the
//! configured base URL joined with the storage path; serving the directory is
//! left to the HTTP layer or a fronting proxy.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{BlobStorage, BlobStorageError};

/// Blob storage writing into a local directory.
#[derive(Clone)]
pub struct LocalBlobStorage {
    root: Arc<Dir>,
    public_base_url: String,
}

impl LocalBlobStorage {
    /// Open (creating if needed) the storage root at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStorageError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(
        root: impl AsRef<Path>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, BlobStorageError> {
        let root = root.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(|error| BlobStorageError::io(error.to_string()))?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(|error| BlobStorageError::io(error.to_string()))?;
        let public_base_url = public_base_url.into().trim_end_matches('/').to_owned();
        Ok(Self {
            root: Arc::new(dir),
            public_base_url,
        })
    }

    /// Public URL for an object stored at `path`.
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}

/// Accept only non-empty relative paths made of plain components.
fn validated_path(path: &str) -> Result<PathBuf, BlobStorageError> {
    let candidate = Path::new(path);
    let plain = !path.is_empty()
        && candidate
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if plain {
        Ok(candidate.to_path_buf())
    } else {
        Err(BlobStorageError::invalid_path(path))
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, BlobStorageError> {
        let relative = validated_path(path)?;
        let root = Arc::clone(&self.root);
        let bytes = bytes.to_vec();
        let size = bytes.len();
        tokio::task::spawn_blocking(move || {
            if let Some(parent) = relative.parent().filter(|p| !p.as_os_str().is_empty()) {
                root.create_dir_all(parent)?;
            }
            root.write(&relative, bytes)
        })
        .await
        .map_err(|error| BlobStorageError::io(error.to_string()))?
        .map_err(|error| BlobStorageError::io(error.to_string()))?;

        debug!(path, content_type, size, "stored blob");
        Ok(self.public_url(path))
    }
}
