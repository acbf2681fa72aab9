/*!
 * Provider implementations for generative model APIs.
 *
 * This module defines the seam between the pipeline and the generative AI
 * service that fetches a web page and emits the bilingual transcript JSON:
 * - Gemini: Vertex-style generative language API over REST
 * - Mock: configurable in-process provider for tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use url::Url;

use crate::errors::ProviderError;
use crate::transcript::model::SchemaVariant;

/// Why the model stopped generating.
///
/// `MaxTokens` is the truncation signal: the output length budget was
/// reached before the model completed its answer, so the raw text is valid
/// JSON up to some point and then cut off mid-stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// The model completed its answer
    Stop,
    /// The output token budget was reached
    MaxTokens,
    /// Generation was blocked by a safety filter
    Safety,
    /// Any other reported reason, kept verbatim
    Other(String),
    /// The API reported no reason
    Unknown,
}

impl FinishReason {
    /// Map the API's reported stop reason string
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("STOP") => Self::Stop,
            Some("MAX_TOKENS") => Self::MaxTokens,
            Some("SAFETY") => Self::Safety,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Unknown,
        }
    }

    /// Whether the raw output must be treated as truncated
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::MaxTokens)
    }

    /// String form recorded in the generation archive
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "STOP",
            Self::MaxTokens => "MAX_TOKENS",
            Self::Safety => "SAFETY",
            Self::Other(s) => s,
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// A transcription request for one submitted URL
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// The page to transcribe and translate
    pub page_url: Url,

    /// Which JSON shape the model is instructed to emit
    pub schema_variant: SchemaVariant,
}

impl TranscriptionRequest {
    /// Create a new transcription request
    pub fn new(page_url: Url, schema_variant: SchemaVariant) -> Self {
        Self {
            page_url,
            schema_variant,
        }
    }
}

/// The model's literal output for one generation call, before parsing
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// The raw text of the first candidate
    pub raw_text: String,

    /// Why generation stopped
    pub finish_reason: FinishReason,

    /// Total token usage reported by the API, if any
    pub total_tokens: Option<u32>,
}

/// Common trait for transcription providers.
///
/// Implementations own the wire format; the pipeline only sees the raw text
/// and the finish reason, which together drive the recovery parser.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync + Debug {
    /// Count the input tokens the request would consume, for the
    /// pre-generation budget gate.
    async fn count_tokens(&self, request: &TranscriptionRequest) -> Result<u32, ProviderError>;

    /// Run one generation call for the request
    async fn generate(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<GenerationOutput, ProviderError>;

    /// Provider name for logs and archives
    fn name(&self) -> &str;
}

pub mod gemini;
pub mod mock;
