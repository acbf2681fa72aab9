use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::providers::{FinishReason, GenerationOutput, TranscriptionProvider, TranscriptionRequest};
use crate::transcript::prompts;

/// Default public endpoint for the generative language API
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Safety categories relaxed for article extraction. Page content is
/// arbitrary, so blocking would fail legitimate articles.
const SAFETY_CATEGORIES: [&str; 5] = [
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_UNSPECIFIED",
    "HARM_CATEGORY_HATE_SPEECH",
];

/// Gemini client for the generative language REST API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model name
    model: String,
    /// Generation settings from config
    config: GenerationConfig,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    /// Conversation contents
    contents: Vec<Content>,

    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,

    /// Safety filter thresholds
    #[serde(skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
}

/// Gemini countTokens request
#[derive(Debug, Serialize)]
struct CountTokensRequest {
    /// Conversation contents
    contents: Vec<Content>,
}

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    /// Role of the sender (user, model)
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,

    /// Message parts
    parts: Vec<Part>,
}

/// One part of a message: either text or a file reference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    /// Plain text part
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    /// File reference part (the page URL the model fetches)
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
}

/// File reference by URI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    /// MIME type of the referenced file
    mime_type: String,
    /// The file URI
    file_uri: String,
}

/// Generation parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Maximum number of tokens to generate
    max_output_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// Top probability mass to consider (nucleus sampling)
    top_p: f32,
}

/// One safety filter setting
#[derive(Debug, Serialize)]
struct SafetySetting {
    /// Harm category
    category: &'static str,
    /// Blocking threshold
    threshold: &'static str,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    /// Response candidates (first one is used)
    #[serde(default)]
    candidates: Vec<Candidate>,

    /// Token usage information
    usage_metadata: Option<UsageMetadata>,
}

/// One response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    /// Candidate content
    content: Option<Content>,

    /// Why the candidate stopped
    finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    /// Total tokens consumed by the call
    total_token_count: Option<u32>,
}

/// Gemini countTokens response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountTokensResponse {
    /// Number of input tokens
    total_tokens: u32,
}

impl Gemini {
    /// Create a new Gemini client from provider configuration
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            config: GenerationConfig {
                max_output_tokens: config.max_output_tokens,
                temperature: config.temperature,
                top_p: config.top_p,
            },
        }
    }

    /// Build the user content for a transcription request: the instruction
    /// text part plus a file part pointing at the page.
    fn build_contents(request: &TranscriptionRequest) -> Vec<Content> {
        vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part {
                    text: Some(prompts::transcription_prompt(request.schema_variant)),
                    file_data: None,
                },
                Part {
                    text: None,
                    file_data: Some(FileData {
                        mime_type: "text/html".to_string(),
                        file_uri: request.page_url.to_string(),
                    }),
                },
            ],
        }]
    }

    /// URL for a model method (generateContent, countTokens)
    fn method_url(&self, method: &str) -> String {
        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!(
            "{}/v1beta/models/{}:{}?key={}",
            base, self.model, method, self.api_key
        )
    }

    /// POST a JSON body and decode the JSON response
    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R, ProviderError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ProviderError::ResponseFormat(e.to_string()))
    }

    /// Extract the first candidate's text from a response
    fn extract_text(response: &GenerateContentResponse) -> String {
        response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TranscriptionProvider for Gemini {
    async fn count_tokens(&self, request: &TranscriptionRequest) -> Result<u32, ProviderError> {
        let body = CountTokensRequest {
            contents: Self::build_contents(request),
        };
        let response: CountTokensResponse =
            self.post_json(&self.method_url("countTokens"), &body).await?;
        Ok(response.total_tokens)
    }

    async fn generate(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<GenerationOutput, ProviderError> {
        let body = GenerateContentRequest {
            contents: Self::build_contents(request),
            generation_config: Some(self.config.clone()),
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        };

        let response: GenerateContentResponse =
            self.post_json(&self.method_url("generateContent"), &body).await?;

        let candidate = response.candidates.first();
        if candidate.is_none() {
            return Err(ProviderError::EmptyResponse);
        }

        let raw_text = Self::extract_text(&response);
        let finish_reason =
            FinishReason::from_api(candidate.and_then(|c| c.finish_reason.as_deref()));

        Ok(GenerationOutput {
            raw_text,
            finish_reason,
            total_tokens: response
                .usage_metadata
                .and_then(|u| u.total_token_count),
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
