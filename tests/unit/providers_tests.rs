/*!
 * Tests for provider types and the mock provider
 */

use url::Url;

use articleplay::errors::ProviderError;
use articleplay::providers::mock::MockProvider;
use articleplay::providers::{FinishReason, TranscriptionProvider, TranscriptionRequest};
use articleplay::transcript::{parse_transcript, SchemaVariant};

fn request(variant: SchemaVariant) -> TranscriptionRequest {
    TranscriptionRequest::new(Url::parse("https://example.com/article").unwrap(), variant)
}

#[test]
fn test_finishReason_fromApi_shouldMapKnownReasons() {
    assert_eq!(FinishReason::from_api(Some("STOP")), FinishReason::Stop);
    assert_eq!(
        FinishReason::from_api(Some("MAX_TOKENS")),
        FinishReason::MaxTokens
    );
    assert_eq!(FinishReason::from_api(Some("SAFETY")), FinishReason::Safety);
    assert_eq!(
        FinishReason::from_api(Some("RECITATION")),
        FinishReason::Other("RECITATION".to_string())
    );
    assert_eq!(FinishReason::from_api(None), FinishReason::Unknown);
}

#[test]
fn test_finishReason_isTruncated_shouldOnlyFlagMaxTokens() {
    assert!(FinishReason::MaxTokens.is_truncated());
    assert!(!FinishReason::Stop.is_truncated());
    assert!(!FinishReason::Safety.is_truncated());
    assert!(!FinishReason::Unknown.is_truncated());
}

#[tokio::test]
async fn test_mockProvider_working_shouldEmitParseableOutput() {
    let provider = MockProvider::working();

    let output = provider.generate(&request(SchemaVariant::TitleBody)).await.unwrap();

    assert_eq!(output.finish_reason, FinishReason::Stop);
    let doc = parse_transcript(&output.raw_text, false, SchemaVariant::TitleBody).unwrap();
    assert!(!doc.title.is_empty());
    assert_eq!(doc.body.len(), 2);
}

#[tokio::test]
async fn test_mockProvider_truncated_shouldEmitRecoverableOutput() {
    let provider = MockProvider::truncated();

    let output = provider.generate(&request(SchemaVariant::PairList)).await.unwrap();

    assert!(output.finish_reason.is_truncated());
    let doc = parse_transcript(&output.raw_text, true, SchemaVariant::PairList).unwrap();
    // The second pair was cut mid-ja; its partial value survives
    assert_eq!(doc.body.len(), 2);
    assert_eq!(doc.body[1].ja, "おは");
}

#[tokio::test]
async fn test_mockProvider_failing_shouldReturnRequestError() {
    let provider = MockProvider::failing();

    let err = provider.generate(&request(SchemaVariant::TitleBody)).await.unwrap_err();

    assert!(matches!(err, ProviderError::RequestFailed(_)));
}

#[tokio::test]
async fn test_mockProvider_countTokens_shouldReflectConfiguredValue() {
    let provider = MockProvider::working().with_input_tokens(4500);

    let tokens = provider.count_tokens(&request(SchemaVariant::TitleBody)).await.unwrap();

    assert_eq!(tokens, 4500);
    assert_eq!(provider.generate_calls(), 0);
}

#[tokio::test]
async fn test_mockProvider_generateCalls_shouldCountInvocations() {
    let provider = MockProvider::working();

    provider.generate(&request(SchemaVariant::TitleBody)).await.unwrap();
    provider.generate(&request(SchemaVariant::TitleBody)).await.unwrap();

    assert_eq!(provider.generate_calls(), 2);
}
