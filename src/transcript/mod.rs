/*!
 * Bilingual transcript model and recovery parsing.
 *
 * This module contains the transcript data model, the recovery parser that
 * turns raw model output into a well-formed transcript (repairing truncated
 * JSON when the generation hit its token budget), and the prompt templates
 * that fix the output schema the parser relies on.
 */

pub mod model;
pub mod prompts;
pub mod recovery;

// Re-export main types
pub use model::{SchemaVariant, SentencePair, TranscriptDocument};
pub use recovery::{parse_transcript, parse_transcript_with_options, RecoveryOptions};
