/*!
 * Transcript data model.
 *
 * These structures map directly to the JSON schema the model is instructed
 * to emit, and are what the rest of the pipeline consumes.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// One sentence aligned across the two languages.
///
/// Both fields are non-empty in a well-formed pair. The repair path may
/// substitute a sentinel value for `ja` when the generation was cut off
/// before the translation was emitted; see [`crate::transcript::recovery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    /// English sentence
    pub en: String,
    /// Japanese sentence
    pub ja: String,
}

impl SentencePair {
    /// Create a new sentence pair
    pub fn new(en: impl Into<String>, ja: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ja: ja.into(),
        }
    }
}

/// The full structured result for one input URL.
///
/// The order of `body` is the reading/playback order and is preserved
/// exactly as emitted by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    /// Content title. Empty for the pair-list schema variant, which
    /// carries no title.
    #[serde(default)]
    pub title: String,

    /// Sentence pairs in reading order
    pub body: Vec<SentencePair>,
}

impl TranscriptDocument {
    /// Create a document from a bare pair list (no title)
    pub fn from_pairs(body: Vec<SentencePair>) -> Self {
        Self {
            title: String::new(),
            body,
        }
    }
}

/// Which of the two JSON shapes a generation request targets.
///
/// The shape is a contract stated in the prompt, so the caller always knows
/// which variant a given raw output should decode as.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// `[{"en": ..., "ja": ...}, ...]`
    PairList,
    /// `{"title": ..., "body": [{"en": ..., "ja": ...}, ...]}`
    #[default]
    TitleBody,
}

impl SchemaVariant {
    // @returns: Lowercase variant identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::PairList => "pairlist".to_string(),
            Self::TitleBody => "titlebody".to_string(),
        }
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for SchemaVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pairlist" | "pair-list" => Ok(Self::PairList),
            "titlebody" | "title-body" => Ok(Self::TitleBody),
            _ => Err(anyhow!("Invalid schema variant: {}", s)),
        }
    }
}
