/*!
 * Transcript recovery parser.
 *
 * Converts raw model output into a [`TranscriptDocument`], tolerating output
 * that was cut off mid-structure by a max-tokens stop condition.
 *
 * The generation API truncates at an exact token boundary with no awareness
 * of JSON structure, so a truncated response can end inside a key, inside a
 * string literal, or between tokens. Because the output schema is fixed and
 * field order is fixed (`en` before `ja`, stated in the prompt), the set of
 * positions at which the cut can fall while emitting the literal
 * `", "ja": "` is finite. Repair is therefore an ordered ladder of exact
 * suffix checks completing that literal, followed by two substring checks
 * for cuts inside the Japanese or English values. No streaming parser is
 * needed.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParseError;
use crate::transcript::model::{SchemaVariant, SentencePair, TranscriptDocument};

/// Default sentinel substituted for a Japanese value the generation never
/// produced. The last pair of a repaired document carrying this text means
/// partial recovery, not failure.
pub const DEFAULT_SENTINEL: &str = "(processing was interrupted)";

/// Japanese rendering of the sentinel, for Japanese-facing deployments
/// (set via `interruption_notice` in the configuration).
pub const SENTINEL_JA: &str = "（処理が途中で終了しました）";

/// Leading markdown fence, in case the model wrapped its output despite
/// being instructed not to.
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*```(?:json)?[ \t]*\n?").expect("static fence regex"));

/// Trailing markdown fence
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n?[ \t]*```\s*$").expect("static fence regex"));

/// Options for the recovery parser.
#[derive(Debug, Clone)]
pub struct RecoveryOptions {
    /// Text substituted for a missing Japanese value. Locale is a
    /// deployment choice, so this is configurable rather than hardcoded.
    pub sentinel: String,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

/// Exact-suffix repair ladder.
///
/// Each entry is (suffix the truncated text ends with, characters still
/// missing from the literal `", "ja": "`). Checked top to bottom, most
/// complete suffix first; the two substring-contains fallbacks in
/// [`repair_truncated`] run only after every exact check has failed, since
/// a contains-check would misfire on text whose suffix needs completing.
const JA_FIELD_LADDER: [(&str, &str); 9] = [
    (r#"", "ja": ""#, ""),
    (r#"", "ja": "#, r#"""#),
    (r#"", "ja":"#, r#" ""#),
    (r#"", "ja""#, r#": ""#),
    (r#"", "ja"#, r#"": ""#),
    (r#"", "j"#, r#"a": ""#),
    (r#"", ""#, r#"ja": ""#),
    (r#"", "#, r#""ja": ""#),
    (r#"","#, r#" "ja": ""#),
];

/// Separator that precedes every Japanese value in a pair object
const JA_SEPARATOR: &str = r#"", "ja": ""#;

/// Opening marker of a pair object's English value
const EN_OPENER: &str = r#"{"en": ""#;

/// Parse raw model output into a transcript document using default options.
///
/// `truncated` must be derived from the model's stop reason (max output
/// budget reached). See [`parse_transcript_with_options`].
pub fn parse_transcript(
    raw_text: &str,
    truncated: bool,
    variant: SchemaVariant,
) -> Result<TranscriptDocument, ParseError> {
    parse_transcript_with_options(raw_text, truncated, variant, &RecoveryOptions::default())
}

/// Parse raw model output into a transcript document.
///
/// Non-truncated output must decode directly; there is no fallback, since a
/// complete generation that fails to decode is a contract violation rather
/// than a recoverable partial result. Truncated output goes through the
/// repair ladder and is then decoded; the last pair of the result may carry
/// the sentinel in `ja`.
pub fn parse_transcript_with_options(
    raw_text: &str,
    truncated: bool,
    variant: SchemaVariant,
    options: &RecoveryOptions,
) -> Result<TranscriptDocument, ParseError> {
    let text = sanitize(raw_text);

    if !truncated {
        return decode(&text, variant).map_err(|e| ParseError::Malformed(e.to_string()));
    }

    let repaired = repair_truncated(&text, variant, &options.sentinel)?;
    decode(&repaired, variant).map_err(|e| ParseError::RepairFailed(e.to_string()))
}

/// Complete a truncated raw text into syntactically closed JSON.
///
/// Returns the repaired string, or `NoRecoverablePair` when the text shows
/// no trace of a pair object to anchor a repair on.
fn repair_truncated(
    text: &str,
    variant: SchemaVariant,
    sentinel: &str,
) -> Result<String, ParseError> {
    let closing = match variant {
        SchemaVariant::PairList => "}]",
        SchemaVariant::TitleBody => "}]}",
    };

    // Cut fell while emitting the `", "ja": "` separator itself
    for (suffix, missing) in JA_FIELD_LADDER {
        if text.ends_with(suffix) {
            return Ok(format!("{text}{missing}{sentinel}\"{closing}"));
        }
    }

    // A Japanese value was started and cut mid-string: close it as-is,
    // preserving the partial text already emitted.
    if text.contains(JA_SEPARATOR) {
        return Ok(format!("{text}\"{closing}"));
    }

    // An English value exists but no `ja` key was ever reached: close the
    // English string and append a whole sentinel field.
    if text.contains(EN_OPENER) {
        return Ok(format!("{text}\", \"ja\": \"{sentinel}\"{closing}"));
    }

    Err(ParseError::NoRecoverablePair)
}

/// Structural decode of (possibly repaired) text into the target shape
fn decode(text: &str, variant: SchemaVariant) -> Result<TranscriptDocument, serde_json::Error> {
    match variant {
        SchemaVariant::PairList => {
            let body: Vec<SentencePair> = serde_json::from_str(text)?;
            Ok(TranscriptDocument::from_pairs(body))
        }
        SchemaVariant::TitleBody => serde_json::from_str(text),
    }
}

/// Trim whitespace and strip markdown code fences
fn sanitize(raw_text: &str) -> String {
    let trimmed = raw_text.trim();
    let without_open = FENCE_OPEN.replace(trimmed, "");
    let without_close = FENCE_CLOSE.replace(&without_open, "");
    without_close.into_owned()
}
