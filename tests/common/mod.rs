/*!
 * Common test utilities for the articleplay test suite
 */

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use articleplay::app_config::Config;
use articleplay::errors::SpeechError;
use articleplay::speech::SpeechSynthesizer;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Route log output through env_logger for the duration of the tests.
/// Level is controlled with RUST_LOG; repeated calls are a no-op.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a config suitable for tests, with storage rooted in the given
/// directory so nothing lands outside the temp tree
pub fn test_config(storage_root: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.tenant_id = "test-tenant".to_string();
    config.storage.root_dir = storage_root.to_string_lossy().to_string();
    config
}

/// Speech synthesizer that returns a fixed payload without any network I/O
pub struct CannedSpeech {
    payload: Bytes,
    calls: Arc<AtomicUsize>,
}

impl CannedSpeech {
    pub fn new() -> Self {
        Self {
            payload: Bytes::from_static(b"mp3-bytes"),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of synthesize calls observed
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for CannedSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for CannedSpeech {
    async fn synthesize(&self, _text: &str) -> Result<Bytes, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }
}

/// Speech synthesizer that always fails
pub struct FailingSpeech;

#[async_trait]
impl SpeechSynthesizer for FailingSpeech {
    async fn synthesize(&self, _text: &str) -> Result<Bytes, SpeechError> {
        Err(SpeechError::RequestFailed(
            "synthesis configured to fail".to_string(),
        ))
    }
}
