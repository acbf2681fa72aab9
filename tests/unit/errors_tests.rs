/*!
 * Tests for error types and their conversions
 */

use articleplay::errors::{AppError, ParseError, ProviderError, SpeechError, StorageError};

#[test]
fn test_parseError_display_shouldDescribeFailure() {
    let err = ParseError::Malformed("expected value at line 1".to_string());
    assert!(err.to_string().contains("malformed model output"));

    let err = ParseError::NoRecoverablePair;
    assert!(err.to_string().contains("no recoverable sentence pair"));

    let err = ParseError::RepairFailed("EOF while parsing a string".to_string());
    assert!(err.to_string().contains("repair of truncated output failed"));
}

#[test]
fn test_providerError_display_shouldIncludeStatusCode() {
    let err = ProviderError::ApiError {
        status_code: 429,
        message: "rate limited".to_string(),
    };

    let text = err.to_string();
    assert!(text.contains("429"));
    assert!(text.contains("rate limited"));
}

#[test]
fn test_appError_from_shouldWrapDomainErrors() {
    let app: AppError = ParseError::NoRecoverablePair.into();
    assert!(matches!(app, AppError::Parse(_)));

    let app: AppError = ProviderError::EmptyResponse.into();
    assert!(matches!(app, AppError::Provider(_)));

    let app: AppError = SpeechError::RequestFailed("timeout".to_string()).into();
    assert!(matches!(app, AppError::Speech(_)));

    let app: AppError = StorageError::WriteFailed {
        path: "text/t/c.json".to_string(),
        message: "disk full".to_string(),
    }
    .into();
    assert!(matches!(app, AppError::Storage(_)));
}

#[test]
fn test_appError_from_anyhow_shouldBecomeUnknown() {
    let app: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app, AppError::Unknown(_)));
}

#[test]
fn test_appError_userMessage_shouldMapParseErrorsToAccessHint() {
    let app: AppError = ParseError::NoRecoverablePair.into();
    let message = app.user_message();

    assert!(message.contains("could not be processed"));
    assert!(message.contains("automated access"));
}

#[test]
fn test_appError_userMessage_shouldMapBudgetErrorToSizeHint() {
    let app = AppError::InputBudgetExceeded {
        tokens: 5000,
        limit: 3000,
    };

    assert_eq!(app.user_message(), "The page is too large to process.");
}

#[test]
fn test_appError_userMessage_shouldNotLeakInternalDetails() {
    let app: AppError = ProviderError::AuthenticationError("bad key abc123".to_string()).into();
    let message = app.user_message();

    assert!(!message.contains("abc123"));
}
