/*!
 * Tests for the transcript recovery parser.
 *
 * These exercise the parser through the public API with realistic model
 * output, truncated at the places a token budget actually cuts.
 */

use articleplay::transcript::{
    parse_transcript, parse_transcript_with_options, RecoveryOptions, SchemaVariant,
};
use articleplay::ParseError;

const SENTINEL: &str = "(processing was interrupted)";

#[test]
fn test_parseTranscript_withWellFormedPairList_shouldDecodeAllPairs() {
    let raw = r#"[{"en": "First sentence.", "ja": "最初の文。"}, {"en": "Second sentence.", "ja": "二番目の文。"}]"#;

    let doc = parse_transcript(raw, false, SchemaVariant::PairList).unwrap();

    assert_eq!(doc.title, "");
    assert_eq!(doc.body.len(), 2);
    assert_eq!(doc.body[0].en, "First sentence.");
    assert_eq!(doc.body[1].ja, "二番目の文。");
}

#[test]
fn test_parseTranscript_withWellFormedTitleBody_shouldKeepTitle() {
    let raw = r#"{"title": "A Short Article", "body": [{"en": "Hello.", "ja": "こんにちは。"}]}"#;

    let doc = parse_transcript(raw, false, SchemaVariant::TitleBody).unwrap();

    assert_eq!(doc.title, "A Short Article");
    assert_eq!(doc.body.len(), 1);
}

#[test]
fn test_parseTranscript_truncatedAfterJaOpenQuote_shouldInsertSentinel() {
    // Cut immediately after the opening quote of the "ja" value
    let raw = r#"[{"en": "Hello.", "ja": ""#;

    let doc = parse_transcript(raw, true, SchemaVariant::PairList).unwrap();

    assert_eq!(doc.body.len(), 1);
    assert_eq!(doc.body[0].en, "Hello.");
    assert_eq!(doc.body[0].ja, SENTINEL);
}

#[test]
fn test_parseTranscript_truncatedMidJaValue_shouldPreservePartialJa() {
    // The "ja" value itself was cut; what is present should be kept as-is
    let raw = r#"[{"en": "Hello world.", "ja": "こん"#;

    let doc = parse_transcript(raw, true, SchemaVariant::PairList).unwrap();

    assert_eq!(doc.body.len(), 1);
    assert_eq!(doc.body[0].ja, "こん");
}

#[test]
fn test_parseTranscript_truncatedMidJaKey_shouldCompleteKeyAndInsertSentinel() {
    // Cut in the middle of the "ja" key itself
    let raw = r#"[{"en": "Hello.", "j"#;

    let doc = parse_transcript(raw, true, SchemaVariant::PairList).unwrap();

    assert_eq!(doc.body.len(), 1);
    assert_eq!(doc.body[0].en, "Hello.");
    assert_eq!(doc.body[0].ja, SENTINEL);
}

#[test]
fn test_parseTranscript_truncatedSecondPair_shouldKeepCompleteFirstPair() {
    let raw =
        r#"[{"en": "Complete pair.", "ja": "完全なペア。"}, {"en": "Cut off here.", "ja": "切断"#;

    let doc = parse_transcript(raw, true, SchemaVariant::PairList).unwrap();

    assert_eq!(doc.body.len(), 2);
    assert_eq!(doc.body[0].ja, "完全なペア。");
    assert_eq!(doc.body[1].ja, "切断");
}

#[test]
fn test_parseTranscript_truncatedTitleBody_shouldCloseOuterObject() {
    let raw = r#"{"title": "Cut Article", "body": [{"en": "Only sentence.", "ja": ""#;

    let doc = parse_transcript(raw, true, SchemaVariant::TitleBody).unwrap();

    assert_eq!(doc.title, "Cut Article");
    assert_eq!(doc.body.len(), 1);
    assert_eq!(doc.body[0].ja, SENTINEL);
}

#[test]
fn test_parseTranscript_withCustomSentinel_shouldUseConfiguredText() {
    let raw = r#"[{"en": "Hello.", "ja": ""#;
    let options = RecoveryOptions {
        sentinel: "（処理が途中で終了しました）".to_string(),
    };

    let doc =
        parse_transcript_with_options(raw, true, SchemaVariant::PairList, &options).unwrap();

    assert_eq!(doc.body[0].ja, "（処理が途中で終了しました）");
}

#[test]
fn test_parseTranscript_withMarkdownFences_shouldStripBeforeParsing() {
    let raw = "```json\n[{\"en\": \"Fenced.\", \"ja\": \"フェンス。\"}]\n```";

    let doc = parse_transcript(raw, false, SchemaVariant::PairList).unwrap();

    assert_eq!(doc.body.len(), 1);
    assert_eq!(doc.body[0].en, "Fenced.");
}

#[test]
fn test_parseTranscript_notTruncatedButMalformed_shouldNotAttemptRepair() {
    // Without the truncation signal this is a contract violation, not a
    // candidate for repair
    let raw = r#"[{"en": "Hello.", "ja": ""#;

    let err = parse_transcript(raw, false, SchemaVariant::PairList).unwrap_err();

    assert!(matches!(err, ParseError::Malformed(_)));
}

#[test]
fn test_parseTranscript_truncatedWithNoPairStructure_shouldReportUnrecoverable() {
    let err = parse_transcript("I cannot access this page.", true, SchemaVariant::PairList)
        .unwrap_err();

    assert!(matches!(err, ParseError::NoRecoverablePair));
}

#[test]
fn test_parseTranscript_repairedOutputStillInvalid_shouldReportRepairFailed() {
    // Trailing backslash swallows the closing quote the repair appends
    let raw = r#"[{"en": "Hello.", "ja": "こん\"#;

    let err = parse_transcript(raw, true, SchemaVariant::PairList).unwrap_err();

    assert!(matches!(err, ParseError::RepairFailed(_)));
}
