/*!
 * Prompt templates for web page transcription and translation.
 *
 * The output schema is a contract: the recovery parser depends on the field
 * order (`en` before `ja`) and the exact shapes promised here, so the format
 * line must stay in sync with `transcript::recovery`.
 */

use crate::transcript::model::SchemaVariant;

/// Instruction preamble shared by both schema variants.
const TRANSCRIPTION_INSTRUCTIONS: &str = "\
Follow these instructions.

DO NOT INCLUDE SUMMARIES, INTERPRETATIONS, OR OPINIONS. WE NEED JUST ARTICLE CONTENT.
If you include anything extra, it will be absolutely unacceptable.

1. Extract only the main article content, exactly as it is, without HTML or metadata.
2. Translate each sentence separately: English to Japanese, Japanese to English.
3. Output the result just like this: {format}
4. Absolutely no extra text, code blocks, or formatting characters.
";

/// Example output line for the pair-list schema
const PAIR_LIST_FORMAT: &str =
    r#"[{"en": "xxxxxx", "ja": "xxxxx"}, {"en": "xxxxxx", "ja": "xxxxx"}]"#;

/// Example output line for the title+body schema
const TITLE_BODY_FORMAT: &str = r#"{"title": "xxxx", "body": [{"en": "xxxxxx", "ja": "xxxxx"}, {"en": "xxxxxx", "ja": "xxxxx"}]}"#;

/// Build the instruction text for a transcription request targeting the
/// given schema variant.
pub fn transcription_prompt(variant: SchemaVariant) -> String {
    let format = match variant {
        SchemaVariant::PairList => PAIR_LIST_FORMAT,
        SchemaVariant::TitleBody => TITLE_BODY_FORMAT,
    };
    TRANSCRIPTION_INSTRUCTIONS.replace("{format}", format)
}
