/*!
 * Error types for the articleplay application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors produced by the transcript recovery parser.
///
/// All variants are non-retryable: regenerating with the same prompt and
/// token budget reproduces the same truncation point, so the caller should
/// surface the failure instead of retrying.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Non-truncated output failed to decode. The model was not cut off,
    /// so a decode failure is an upstream contract violation, not a
    /// recoverable partial result.
    #[error("malformed model output: {0}")]
    Malformed(String),

    /// Truncated output matched none of the known repair patterns.
    #[error("no recoverable sentence pair in truncated output")]
    NoRecoverablePair,

    /// A repair was applied but the repaired text still failed to decode.
    #[error("repair of truncated output failed: {0}")]
    RepairFailed(String),
}

/// Errors that can occur when working with the generative model API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ResponseFormat(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The response carried no candidate text at all
    #[error("Model response contained no content")]
    EmptyResponse,

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during speech synthesis
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Error when making an API request fails
    #[error("Speech API request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the API itself
    #[error("Speech API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The synthesized payload could not be decoded
    #[error("Invalid audio payload: {0}")]
    InvalidPayload(String),
}

/// Errors that can occur when writing to object storage
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error writing an object
    #[error("Failed to store object at {path}: {message}")]
    WriteFailed {
        /// Object path within the store
        path: String,
        /// Underlying error message
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The submitted URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page exceeds the configured input token budget
    #[error("Input token budget exceeded: {tokens} > {limit}")]
    InputBudgetExceeded {
        /// Counted input tokens
        tokens: u32,
        /// Configured budget
        limit: u32,
    },

    /// Error from the transcript recovery parser
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from the generative model provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from speech synthesis
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Error from object storage
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from the content record database
    #[error("Database error: {0}")]
    Database(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl AppError {
    /// User-facing message recorded against the content record when a
    /// content-creation attempt fails.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidUrl(_) => {
                "The submitted URL could not be processed.".to_string()
            }
            AppError::InputBudgetExceeded { .. } => {
                "The page is too large to process.".to_string()
            }
            AppError::Parse(_) => {
                "The source content could not be processed. \
                 The target URL may not allow automated access; please try another URL."
                    .to_string()
            }
            _ => "Processing failed. Please try again with another URL.".to_string(),
        }
    }
}
