/*!
 * Filesystem-backed object store.
 *
 * Used by the CLI and tests. Objects land under the configured root
 * directory with the same relative layout a bucket would use.
 */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::errors::StorageError;
use crate::storage::{audio_object_path, text_object_path, ObjectStore};

/// Object store writing to the local filesystem
pub struct LocalObjectStore {
    /// Root directory all object paths are joined to
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create a store rooted at the given directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn write_object(&self, object_path: &str, payload: &[u8]) -> Result<(), StorageError> {
        let full_path = self.root.join(object_path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::WriteFailed {
                    path: object_path.to_string(),
                    message: e.to_string(),
                })?;
        }

        tokio::fs::write(&full_path, payload)
            .await
            .map_err(|e| StorageError::WriteFailed {
                path: object_path.to_string(),
                message: e.to_string(),
            })?;

        debug!("Stored object: {:?}", full_path);
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put_text(
        &self,
        tenant_id: &str,
        content_id: &str,
        payload: &str,
    ) -> Result<String, StorageError> {
        let object_path = text_object_path(tenant_id, content_id);
        self.write_object(&object_path, payload.as_bytes()).await?;
        Ok(object_path)
    }

    async fn put_audio(
        &self,
        tenant_id: &str,
        content_id: &str,
        index: usize,
        payload: &[u8],
    ) -> Result<String, StorageError> {
        let object_path = audio_object_path(tenant_id, content_id, index);
        self.write_object(&object_path, payload).await?;
        Ok(object_path)
    }
}
