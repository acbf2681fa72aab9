/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide type-safe
 * access to persisted content records.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing state of one content record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Pipeline is running for this content
    Processing,
    /// Transcript and all audio clips were produced
    Completed,
    /// The content-creation attempt failed; the title carries the
    /// user-facing failure message
    Error,
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentStatus::Processing => write!(f, "processing"),
            ContentStatus::Completed => write!(f, "completed"),
            ContentStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for ContentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "processing" => Ok(ContentStatus::Processing),
            "completed" => Ok(ContentStatus::Completed),
            "error" => Ok(ContentStatus::Error),
            _ => Err(anyhow::anyhow!("Invalid content status: {}", s)),
        }
    }
}

/// One content record: a submitted URL and what became of it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Content identifier (unique within a tenant)
    pub content_id: String,
    /// Owning tenant
    pub tenant_id: String,
    /// The submitted URL
    pub url: String,
    /// Content title; failure message when status is `error`
    pub title: String,
    /// Number of audio clips produced
    pub audio_count: i64,
    /// Current processing status
    pub status: ContentStatus,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl ContentRecord {
    /// Create a fresh record in the `processing` state
    pub fn new(content_id: String, tenant_id: String, url: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            content_id,
            tenant_id,
            url,
            title: String::new(),
            audio_count: 0,
            status: ContentStatus::Processing,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether the record represents browsable content
    pub fn is_playable(&self) -> bool {
        self.status == ContentStatus::Completed && self.audio_count > 0
    }
}
