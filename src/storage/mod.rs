/*!
 * Object storage boundary.
 *
 * Stores the archived generation outcome and the per-sentence audio clips
 * under a canonical path layout:
 * - `text/{tenant}/{contentId}.json`
 * - `audio/{tenant}/{contentId}-{n}.mp3` (n starts at 1, in body order)
 */

use async_trait::async_trait;

use crate::errors::StorageError;

/// Canonical object path for the archived generation outcome
pub fn text_object_path(tenant_id: &str, content_id: &str) -> String {
    format!("text/{}/{}.json", tenant_id, content_id)
}

/// Canonical object path for one audio clip. `index` is 1-based and follows
/// the transcript body order.
pub fn audio_object_path(tenant_id: &str, content_id: &str, index: usize) -> String {
    format!("audio/{}/{}-{}.mp3", tenant_id, content_id, index)
}

/// Common trait for object stores
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a JSON text object, returning the object path
    async fn put_text(
        &self,
        tenant_id: &str,
        content_id: &str,
        payload: &str,
    ) -> Result<String, StorageError>;

    /// Store one audio clip, returning the object path
    async fn put_audio(
        &self,
        tenant_id: &str,
        content_id: &str,
        index: usize,
        payload: &[u8],
    ) -> Result<String, StorageError>;
}

pub mod local;

pub use local::LocalObjectStore;
