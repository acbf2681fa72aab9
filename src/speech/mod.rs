/*!
 * Speech synthesis boundary.
 *
 * The pipeline synthesizes one MP3 clip per sentence pair, in body order.
 * This module defines the synthesizer seam and the Google-style REST
 * implementation.
 */

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::SpeechError;

/// Common trait for speech synthesizers
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one sentence to MP3 bytes
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError>;
}

pub mod google;

pub use google::GoogleSpeech;
