use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use bytes::Bytes;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::SpeechConfig;
use crate::errors::SpeechError;
use crate::speech::SpeechSynthesizer;

/// Default public endpoint for the text-to-speech API
const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com";

/// Google text-to-speech client
pub struct GoogleSpeech {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Synthesis settings from config
    config: SpeechConfig,
}

/// text:synthesize request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    /// Input text
    input: SynthesisInput,
    /// Voice selection
    voice: VoiceSelection,
    /// Audio output parameters
    audio_config: AudioConfig,
}

/// Input text wrapper
#[derive(Debug, Serialize)]
struct SynthesisInput {
    /// The sentence to synthesize
    text: String,
}

/// Voice selection parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    /// BCP-47 language code
    language_code: String,
    /// Voice name
    name: String,
}

/// Audio output parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    /// Output encoding
    audio_encoding: &'static str,
    /// Output sample rate
    sample_rate_hertz: u32,
    /// Device effects profile
    #[serde(skip_serializing_if = "Vec::is_empty")]
    effects_profile_id: Vec<String>,
    /// Pitch adjustment
    pitch: f32,
    /// Speaking rate multiplier
    speaking_rate: f32,
}

/// text:synthesize response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    /// Base64-encoded audio payload
    audio_content: String,
}

impl GoogleSpeech {
    /// Create a new client from speech configuration
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            config: config.clone(),
        }
    }

    fn synthesize_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1/text:synthesize?key={}", base, self.api_key)
    }

    fn build_request(&self, text: &str) -> SynthesizeRequest {
        SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelection {
                language_code: self.config.language_code.clone(),
                name: self.config.voice.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                sample_rate_hertz: self.config.sample_rate_hertz,
                effects_profile_id: self.config.effects_profile.clone(),
                pitch: self.config.pitch,
                speaking_rate: self.config.speaking_rate,
            },
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError> {
        let response = self
            .client
            .post(self.synthesize_url())
            .header("Content-Type", "application/json")
            .json(&self.build_request(text))
            .send()
            .await
            .map_err(|e| SpeechError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Speech API error ({}): {}", status, error_text);
            return Err(SpeechError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let synthesize_response = response
            .json::<SynthesizeResponse>()
            .await
            .map_err(|e| SpeechError::InvalidPayload(e.to_string()))?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(synthesize_response.audio_content.as_bytes())
            .map_err(|e| SpeechError::InvalidPayload(e.to_string()))?;

        Ok(Bytes::from(audio))
    }
}
