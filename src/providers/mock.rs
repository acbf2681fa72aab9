/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Succeeds with a well-formed transcript
 * - `MockProvider::truncated()` - Returns output cut off at a token budget
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::canned(...)` - Returns exactly the given raw text
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::{FinishReason, GenerationOutput, TranscriptionProvider, TranscriptionRequest};
use crate::transcript::model::SchemaVariant;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Succeeds with a well-formed transcript for the requested variant
    Working,
    /// Returns output truncated mid-pair with a MAX_TOKENS finish reason
    Truncated,
    /// Always fails with an error
    Failing,
    /// Returns the given raw text with the given finish reason
    Canned {
        /// The raw text to return
        raw_text: String,
        /// The finish reason to report
        finish_reason: FinishReason,
    },
}

/// Mock provider for testing pipeline behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Simulated input token count
    input_tokens: u32,
    /// Number of generate calls observed
    generate_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            input_tokens: 100,
            generate_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that returns truncated output
    pub fn truncated() -> Self {
        Self::new(MockBehavior::Truncated)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns exactly the given raw text
    pub fn canned(raw_text: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self::new(MockBehavior::Canned {
            raw_text: raw_text.into(),
            finish_reason,
        })
    }

    /// Set the simulated input token count
    pub fn with_input_tokens(mut self, tokens: u32) -> Self {
        self.input_tokens = tokens;
        self
    }

    /// Number of generate calls made against this mock
    pub fn generate_calls(&self) -> usize {
        self.generate_count.load(Ordering::SeqCst)
    }

    fn well_formed_output(variant: SchemaVariant) -> String {
        match variant {
            SchemaVariant::PairList => {
                r#"[{"en": "Hello world.", "ja": "こんにちは世界。"}, {"en": "Good morning.", "ja": "おはよう。"}]"#.to_string()
            }
            SchemaVariant::TitleBody => {
                r#"{"title": "Mock Article", "body": [{"en": "Hello world.", "ja": "こんにちは世界。"}, {"en": "Good morning.", "ja": "おはよう。"}]}"#.to_string()
            }
        }
    }

    fn truncated_output(variant: SchemaVariant) -> String {
        match variant {
            SchemaVariant::PairList => {
                r#"[{"en": "Hello world.", "ja": "こんにちは世界。"}, {"en": "Good morning.", "ja": "おは"#.to_string()
            }
            SchemaVariant::TitleBody => {
                r#"{"title": "Mock Article", "body": [{"en": "Hello world.", "ja": "こんにちは世界。"}, {"en": "Good morning.", "ja": "おは"#.to_string()
            }
        }
    }
}

#[async_trait]
impl TranscriptionProvider for MockProvider {
    async fn count_tokens(&self, _request: &TranscriptionRequest) -> Result<u32, ProviderError> {
        Ok(self.input_tokens)
    }

    async fn generate(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<GenerationOutput, ProviderError> {
        self.generate_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(GenerationOutput {
                raw_text: Self::well_formed_output(request.schema_variant),
                finish_reason: FinishReason::Stop,
                total_tokens: Some(200),
            }),
            MockBehavior::Truncated => Ok(GenerationOutput {
                raw_text: Self::truncated_output(request.schema_variant),
                finish_reason: FinishReason::MaxTokens,
                total_tokens: Some(200),
            }),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Canned {
                raw_text,
                finish_reason,
            } => Ok(GenerationOutput {
                raw_text: raw_text.clone(),
                finish_reason: finish_reason.clone(),
                total_tokens: Some(200),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
