/*!
 * # ArticlePlay - Listen to any article, bilingually
 *
 * A Rust library that turns a web article URL into a bilingual
 * English/Japanese transcript with per-sentence audio.
 *
 * ## Features
 *
 * - Transcribe web pages with a generative model (Gemini)
 * - Sentence-aligned English/Japanese output
 * - Recovery of transcripts from output truncated at the token budget
 * - Per-sentence speech synthesis (Google Cloud Text-to-Speech)
 * - Local object storage for transcripts and audio clips
 * - SQLite catalog of created content
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `transcript`: Transcript model, prompts and truncation recovery:
 *   - `transcript::model`: Sentence pairs and document shapes
 *   - `transcript::prompts`: Instructions sent to the model
 *   - `transcript::recovery`: Parsing and truncated-JSON repair
 * - `providers`: Generative model clients:
 *   - `providers::gemini`: Gemini API client
 *   - `providers::mock`: Scriptable provider for tests
 * - `speech`: Text-to-speech clients
 * - `storage`: Object storage for transcripts and audio
 * - `database`: SQLite content catalog
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod providers;
pub mod speech;
pub mod storage;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ProcessOutcome};
pub use database::{ContentRecord, ContentStatus, Repository};
pub use errors::{AppError, ParseError, ProviderError, SpeechError, StorageError};
pub use transcript::{parse_transcript, SchemaVariant, SentencePair, TranscriptDocument};
