use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::app_config::Config;
use crate::database::{ContentRecord, Repository};
use crate::errors::AppError;
use crate::providers::gemini::Gemini;
use crate::providers::{TranscriptionProvider, TranscriptionRequest};
use crate::speech::{GoogleSpeech, SpeechSynthesizer};
use crate::storage::{LocalObjectStore, ObjectStore};
use crate::transcript::model::TranscriptDocument;
use crate::transcript::recovery::{self, RecoveryOptions};

// @module: Application controller for the content-creation pipeline

/// Outcome of one content-creation run
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Identifier of the created content
    pub content_id: String,
    /// The parsed transcript
    pub document: TranscriptDocument,
    /// Number of audio clips produced
    pub audio_count: usize,
    /// Wall-clock duration of generation plus parsing
    pub processing_ms: u128,
    /// The model's reported stop reason
    pub finish_reason: String,
    /// Whether the transcript was recovered from truncated output
    pub recovered: bool,
}

/// Generation outcome archived verbatim to object storage for audit/debug.
/// This is written before any audio is synthesized so a failed synthesis
/// still leaves the raw evidence behind.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationArchive {
    /// Archive timestamp (ISO 8601)
    timestamp: String,
    /// The submitted URL
    input_url: String,
    /// Provider name
    provider: String,
    /// Generation plus parsing duration in milliseconds
    processing_ms: u128,
    /// The parsed transcript
    result: TranscriptDocument,
    /// Content identifier
    content_id: String,
    /// The model's reported stop reason
    finish_reason: String,
    /// Input tokens counted before generation
    count_total_tokens: u32,
    /// Total tokens reported by the generation call
    total_tokens: u32,
    /// SHA-256 of the raw model text, for matching archives to transcripts
    raw_sha256: String,
}

/// Main application controller for the content-creation pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Generative model provider
    provider: Arc<dyn TranscriptionProvider>,
    // @field: Speech synthesizer
    speech: Arc<dyn SpeechSynthesizer>,
    // @field: Object store for archives and audio
    store: Arc<dyn ObjectStore>,
    // @field: Content record repository
    repository: Repository,
}

impl Controller {
    // @method: Create a controller with real service clients from config
    pub fn with_config(config: Config) -> Result<Self> {
        let provider = Arc::new(Gemini::new(&config.provider));
        let speech = Arc::new(GoogleSpeech::new(&config.speech));
        let store = Arc::new(LocalObjectStore::new(&config.storage.root_dir));
        let repository = Repository::new_default().context("Failed to open content database")?;

        Ok(Self {
            config,
            provider,
            speech,
            store,
            repository,
        })
    }

    /// Create a controller from explicit collaborators (used by tests)
    pub fn new(
        config: Config,
        provider: Arc<dyn TranscriptionProvider>,
        speech: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn ObjectStore>,
        repository: Repository,
    ) -> Self {
        Self {
            config,
            provider,
            speech,
            store,
            repository,
        }
    }

    /// Content record repository
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Process one submitted URL end to end.
    ///
    /// A `processing` record is inserted first; on success it is marked
    /// completed with the title and audio count, on failure it is kept with
    /// an `error` status and a user-facing message as the title.
    pub async fn process_url(&self, raw_url: &str) -> Result<ProcessOutcome, AppError> {
        let url = Url::parse(raw_url).map_err(|e| AppError::InvalidUrl(e.to_string()))?;
        let content_id = uuid::Uuid::new_v4().to_string();
        let tenant_id = self.config.tenant_id.clone();

        info!(
            "Processing started: tenant={} content={} url={}",
            tenant_id, content_id, url
        );

        let record = ContentRecord::new(content_id.clone(), tenant_id.clone(), url.to_string());
        self.repository
            .create_content(&record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match self.run_pipeline(&url, &tenant_id, &content_id).await {
            Ok(outcome) => {
                self.repository
                    .mark_completed(
                        &tenant_id,
                        &content_id,
                        &outcome.document.title,
                        outcome.audio_count as i64,
                    )
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                info!(
                    "Processing completed: content={} pairs={} audio={} finish={} ({} ms)",
                    content_id,
                    outcome.document.body.len(),
                    outcome.audio_count,
                    outcome.finish_reason,
                    outcome.processing_ms
                );

                Ok(outcome)
            }
            Err(err) => {
                error!("Content processing failed: content={} error={}", content_id, err);

                // Keep the record so the failure is visible when browsing;
                // the message takes the title slot.
                if let Err(db_err) = self
                    .repository
                    .mark_error(&tenant_id, &content_id, &err.user_message())
                    .await
                {
                    error!("Failed to record error status: {}", db_err);
                }

                Err(err)
            }
        }
    }

    async fn run_pipeline(
        &self,
        url: &Url,
        tenant_id: &str,
        content_id: &str,
    ) -> Result<ProcessOutcome, AppError> {
        let request = TranscriptionRequest::new(url.clone(), self.config.schema_variant);

        // Budget gate before the expensive generation call
        let input_tokens = self.provider.count_tokens(&request).await?;
        let limit = self.config.provider.max_input_tokens;
        if input_tokens > limit {
            return Err(AppError::InputBudgetExceeded {
                tokens: input_tokens,
                limit,
            });
        }
        debug!("Input tokens: {} (budget {})", input_tokens, limit);

        let started = Instant::now();
        let output = self.provider.generate(&request).await?;
        let truncated = output.finish_reason.is_truncated();

        if truncated {
            info!("Generation hit the output token budget, attempting recovery");
        }

        let options = RecoveryOptions {
            sentinel: self.config.interruption_notice.clone(),
        };
        let document = recovery::parse_transcript_with_options(
            &output.raw_text,
            truncated,
            self.config.schema_variant,
            &options,
        )?;
        let processing_ms = started.elapsed().as_millis();

        self.archive_generation(
            url,
            tenant_id,
            content_id,
            &output.raw_text,
            output.finish_reason.as_str(),
            input_tokens,
            output.total_tokens.unwrap_or(0),
            &document,
            processing_ms,
        )
        .await?;

        let audio_count = self
            .synthesize_audio(tenant_id, content_id, &document)
            .await?;

        Ok(ProcessOutcome {
            content_id: content_id.to_string(),
            audio_count,
            processing_ms,
            finish_reason: output.finish_reason.as_str().to_string(),
            recovered: truncated,
            document,
        })
    }

    /// Archive the generation outcome under `text/{tenant}/{id}.json`
    #[allow(clippy::too_many_arguments)]
    async fn archive_generation(
        &self,
        url: &Url,
        tenant_id: &str,
        content_id: &str,
        raw_text: &str,
        finish_reason: &str,
        count_total_tokens: u32,
        total_tokens: u32,
        document: &TranscriptDocument,
        processing_ms: u128,
    ) -> Result<(), AppError> {
        let archive = GenerationArchive {
            timestamp: chrono::Utc::now().to_rfc3339(),
            input_url: url.to_string(),
            provider: self.provider.name().to_string(),
            processing_ms,
            result: document.clone(),
            content_id: content_id.to_string(),
            finish_reason: finish_reason.to_string(),
            count_total_tokens,
            total_tokens,
            raw_sha256: format!("{:x}", Sha256::digest(raw_text.as_bytes())),
        };

        let payload = serde_json::to_string_pretty(&archive)
            .map_err(|e| AppError::Unknown(e.to_string()))?;

        let path = self.store.put_text(tenant_id, content_id, &payload).await?;
        debug!("Archived generation outcome to {}", path);
        Ok(())
    }

    /// Synthesize one clip per sentence pair, in body order.
    ///
    /// Synthesis is deliberately sequential: clip indices are the playback
    /// order and must line up with the transcript body.
    async fn synthesize_audio(
        &self,
        tenant_id: &str,
        content_id: &str,
        document: &TranscriptDocument,
    ) -> Result<usize, AppError> {
        let progress_bar = ProgressBar::new(document.body.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result);
        progress_bar.set_message("Synthesizing audio");

        let mut audio_count = 0;
        for (i, pair) in document.body.iter().enumerate() {
            let audio = self.speech.synthesize(&pair.en).await?;
            let path = self
                .store
                .put_audio(tenant_id, content_id, i + 1, &audio)
                .await?;
            debug!("Stored audio clip {}", path);
            audio_count += 1;
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        Ok(audio_count)
    }
}
