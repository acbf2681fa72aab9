/*!
 * Tests for the content record repository
 */

use articleplay::database::{ContentRecord, ContentStatus, Repository};

fn record(content_id: &str, tenant_id: &str) -> ContentRecord {
    ContentRecord::new(
        content_id.to_string(),
        tenant_id.to_string(),
        format!("https://example.com/{}", content_id),
    )
}

#[tokio::test]
async fn test_createContent_shouldBeRetrievable() {
    let repo = Repository::new_in_memory().unwrap();

    repo.create_content(&record("c1", "alice")).await.unwrap();

    let found = repo.get_content("alice", "c1").await.unwrap().unwrap();
    assert_eq!(found.content_id, "c1");
    assert_eq!(found.status, ContentStatus::Processing);
    assert_eq!(found.audio_count, 0);
}

#[tokio::test]
async fn test_getContent_shouldScopeByTenant() {
    let repo = Repository::new_in_memory().unwrap();

    repo.create_content(&record("c1", "alice")).await.unwrap();

    assert!(repo.get_content("bob", "c1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_markCompleted_shouldStoreTitleAndAudioCount() {
    let repo = Repository::new_in_memory().unwrap();
    repo.create_content(&record("c1", "alice")).await.unwrap();

    repo.mark_completed("alice", "c1", "An Article", 7)
        .await
        .unwrap();

    let found = repo.get_content("alice", "c1").await.unwrap().unwrap();
    assert_eq!(found.status, ContentStatus::Completed);
    assert_eq!(found.title, "An Article");
    assert_eq!(found.audio_count, 7);
    assert!(found.is_playable());
}

#[tokio::test]
async fn test_markError_shouldStoreMessageAsTitle() {
    let repo = Repository::new_in_memory().unwrap();
    repo.create_content(&record("c1", "alice")).await.unwrap();

    repo.mark_error("alice", "c1", "The page is too large to process.")
        .await
        .unwrap();

    let found = repo.get_content("alice", "c1").await.unwrap().unwrap();
    assert_eq!(found.status, ContentStatus::Error);
    assert_eq!(found.title, "The page is too large to process.");
    assert_eq!(found.audio_count, 0);
    assert!(!found.is_playable());
}

#[tokio::test]
async fn test_listContents_shouldReturnOnlyTenantRecordsNewestFirst() {
    let repo = Repository::new_in_memory().unwrap();

    let mut first = record("c1", "alice");
    first.created_at = "2026-01-01T00:00:00Z".to_string();
    let mut second = record("c2", "alice");
    second.created_at = "2026-02-01T00:00:00Z".to_string();
    let other = record("c3", "bob");

    repo.create_content(&first).await.unwrap();
    repo.create_content(&second).await.unwrap();
    repo.create_content(&other).await.unwrap();

    let records = repo.list_contents("alice").await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].content_id, "c2");
    assert_eq!(records[1].content_id, "c1");
}

#[tokio::test]
async fn test_createContent_duplicateId_shouldFail() {
    let repo = Repository::new_in_memory().unwrap();

    repo.create_content(&record("c1", "alice")).await.unwrap();

    assert!(repo.create_content(&record("c1", "alice")).await.is_err());
}
