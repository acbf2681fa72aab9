use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::transcript::model::SchemaVariant;
use crate::transcript::recovery::DEFAULT_SENTINEL;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Tenant the created content belongs to
    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,

    /// Which JSON shape the model is asked to emit
    #[serde(default)]
    pub schema_variant: SchemaVariant,

    /// Text substituted for a Japanese value lost to truncation. Kept
    /// configurable so deployments can localize it.
    #[serde(default = "default_interruption_notice")]
    pub interruption_notice: String,

    /// Generative model provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Speech synthesis config
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Object storage config
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generative model provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL (empty means the public endpoint)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Input token budget checked before generation
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: u32,

    // @field: Output token budget for one generation
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Nucleus sampling mass
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            max_input_tokens: default_max_input_tokens(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL (empty means the public endpoint)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: BCP-47 language code of the synthesized voice
    #[serde(default = "default_speech_language_code")]
    pub language_code: String,

    // @field: Voice name
    #[serde(default = "default_voice")]
    pub voice: String,

    // @field: Output sample rate
    #[serde(default = "default_sample_rate_hertz")]
    pub sample_rate_hertz: u32,

    // @field: Speaking rate multiplier
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f32,

    // @field: Pitch adjustment
    #[serde(default)]
    pub pitch: f32,

    // @field: Device effects profile
    #[serde(default = "default_effects_profile")]
    pub effects_profile: Vec<String>,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            language_code: default_speech_language_code(),
            voice: default_voice(),
            sample_rate_hertz: default_sample_rate_hertz(),
            speaking_rate: default_speaking_rate(),
            pitch: 0.0,
            effects_profile: default_effects_profile(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Object storage configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    // @field: Root directory of the local object store
    #[serde(default = "default_storage_root")]
    pub root_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_storage_root(),
        }
    }
}

/// Log level for application logging
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl Config {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.tenant_id.trim().is_empty() {
            return Err(anyhow!("tenant_id must not be empty"));
        }

        if self.interruption_notice.trim().is_empty() {
            return Err(anyhow!("interruption_notice must not be empty"));
        }

        if self.provider.model.trim().is_empty() {
            return Err(anyhow!("provider.model must not be empty"));
        }

        if self.provider.max_input_tokens == 0 {
            return Err(anyhow!("provider.max_input_tokens must be positive"));
        }

        if self.provider.max_output_tokens == 0 {
            return Err(anyhow!("provider.max_output_tokens must be positive"));
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(anyhow!(
                "provider.temperature must be between 0.0 and 2.0, got {}",
                self.provider.temperature
            ));
        }

        if !(0.0..=1.0).contains(&self.provider.top_p) {
            return Err(anyhow!(
                "provider.top_p must be between 0.0 and 1.0, got {}",
                self.provider.top_p
            ));
        }

        if self.speech.voice.trim().is_empty() {
            return Err(anyhow!("speech.voice must not be empty"));
        }

        if !(0.25..=4.0).contains(&self.speech.speaking_rate) {
            return Err(anyhow!(
                "speech.speaking_rate must be between 0.25 and 4.0, got {}",
                self.speech.speaking_rate
            ));
        }

        if self.storage.root_dir.trim().is_empty() {
            return Err(anyhow!("storage.root_dir must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tenant_id: default_tenant_id(),
            schema_variant: SchemaVariant::default(),
            interruption_notice: default_interruption_notice(),
            provider: ProviderConfig::default(),
            speech: SpeechConfig::default(),
            storage: StorageConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

fn default_tenant_id() -> String {
    "local".to_string()
}

fn default_interruption_notice() -> String {
    DEFAULT_SENTINEL.to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_max_input_tokens() -> u32 {
    3000
}

fn default_max_output_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.5
}

fn default_top_p() -> f32 {
    0.95
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_speech_language_code() -> String {
    "en-US".to_string()
}

fn default_voice() -> String {
    "en-US-Neural2-I".to_string()
}

fn default_sample_rate_hertz() -> u32 {
    24000
}

fn default_speaking_rate() -> f32 {
    1.0
}

fn default_effects_profile() -> Vec<String> {
    vec!["handset-class-device".to_string()]
}

fn default_storage_root() -> String {
    "output".to_string()
}
