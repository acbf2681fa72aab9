/*!
 * Repository layer for database operations.
 *
 * Provides a high-level API for content record operations, abstracting away
 * the SQL details and providing type-safe access.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{ContentRecord, ContentStatus};

/// Repository for content record operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Insert a new content record
    pub async fn create_content(&self, record: &ContentRecord) -> Result<()> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO contents (
                        content_id, tenant_id, url, title, audio_count, status,
                        created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        record.content_id,
                        record.tenant_id,
                        record.url,
                        record.title,
                        record.audio_count,
                        record.status.to_string(),
                        record.created_at,
                        record.updated_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get one content record
    pub async fn get_content(
        &self,
        tenant_id: &str,
        content_id: &str,
    ) -> Result<Option<ContentRecord>> {
        let tenant_id = tenant_id.to_string();
        let content_id = content_id.to_string();

        self.db
            .execute_async(move |conn| Self::get_content_sync(conn, &tenant_id, &content_id))
            .await
    }

    fn get_content_sync(
        conn: &Connection,
        tenant_id: &str,
        content_id: &str,
    ) -> Result<Option<ContentRecord>> {
        let result = conn
            .query_row(
                r#"
                SELECT content_id, tenant_id, url, title, audio_count, status,
                       created_at, updated_at
                FROM contents WHERE tenant_id = ?1 AND content_id = ?2
                "#,
                [tenant_id, content_id],
                Self::map_record,
            )
            .optional()?;

        Ok(result)
    }

    /// List a tenant's content records, newest first
    pub async fn list_contents(&self, tenant_id: &str) -> Result<Vec<ContentRecord>> {
        let tenant_id = tenant_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT content_id, tenant_id, url, title, audio_count, status,
                           created_at, updated_at
                    FROM contents WHERE tenant_id = ?1
                    ORDER BY created_at DESC
                    "#,
                )?;

                let records = stmt
                    .query_map([&tenant_id], Self::map_record)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(records)
            })
            .await
    }

    /// Mark a record completed with its final title and audio count
    pub async fn mark_completed(
        &self,
        tenant_id: &str,
        content_id: &str,
        title: &str,
        audio_count: i64,
    ) -> Result<()> {
        debug!("Marking content {} completed", content_id);
        self.set_outcome(
            tenant_id,
            content_id,
            ContentStatus::Completed,
            title,
            audio_count,
        )
        .await
    }

    /// Mark a record failed. The user-facing failure message is stored as
    /// the title, mirroring what the browsing surface displays.
    pub async fn mark_error(
        &self,
        tenant_id: &str,
        content_id: &str,
        message: &str,
    ) -> Result<()> {
        debug!("Marking content {} failed", content_id);
        self.set_outcome(tenant_id, content_id, ContentStatus::Error, message, 0)
            .await
    }

    async fn set_outcome(
        &self,
        tenant_id: &str,
        content_id: &str,
        status: ContentStatus,
        title: &str,
        audio_count: i64,
    ) -> Result<()> {
        let tenant_id = tenant_id.to_string();
        let content_id = content_id.to_string();
        let title = title.to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    UPDATE contents
                    SET status = ?1, title = ?2, audio_count = ?3, updated_at = ?4
                    WHERE tenant_id = ?5 AND content_id = ?6
                    "#,
                    params![
                        status.to_string(),
                        title,
                        audio_count,
                        now,
                        tenant_id,
                        content_id
                    ],
                )?;
                Ok(())
            })
            .await
    }

    fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentRecord> {
        Ok(ContentRecord {
            content_id: row.get(0)?,
            tenant_id: row.get(1)?,
            url: row.get(2)?,
            title: row.get(3)?,
            audio_count: row.get(4)?,
            status: row
                .get::<_, String>(5)?
                .parse()
                .unwrap_or(ContentStatus::Processing),
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}
