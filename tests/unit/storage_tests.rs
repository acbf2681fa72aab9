/*!
 * Tests for the object storage layer
 */

use articleplay::storage::{
    audio_object_path, text_object_path, LocalObjectStore, ObjectStore,
};

use crate::common::create_temp_dir;

#[test]
fn test_objectPaths_shouldFollowTenantLayout() {
    assert_eq!(
        text_object_path("alice", "550e8400"),
        "text/alice/550e8400.json"
    );
    assert_eq!(
        audio_object_path("alice", "550e8400", 1),
        "audio/alice/550e8400-1.mp3"
    );
    assert_eq!(
        audio_object_path("alice", "550e8400", 12),
        "audio/alice/550e8400-12.mp3"
    );
}

#[tokio::test]
async fn test_localStore_putText_shouldPersistPayload() {
    let dir = create_temp_dir().unwrap();
    let store = LocalObjectStore::new(dir.path());

    let path = store
        .put_text("alice", "content-1", r#"{"title": "T"}"#)
        .await
        .unwrap();

    let written = std::fs::read_to_string(dir.path().join(&path)).unwrap();
    assert_eq!(written, r#"{"title": "T"}"#);
}

#[tokio::test]
async fn test_localStore_putAudio_shouldKeepClipsSeparate() {
    let dir = create_temp_dir().unwrap();
    let store = LocalObjectStore::new(dir.path());

    store
        .put_audio("alice", "content-1", 1, b"first")
        .await
        .unwrap();
    store
        .put_audio("alice", "content-1", 2, b"second")
        .await
        .unwrap();

    let first = std::fs::read(dir.path().join("audio/alice/content-1-1.mp3")).unwrap();
    let second = std::fs::read(dir.path().join("audio/alice/content-1-2.mp3")).unwrap();
    assert_eq!(first, b"first");
    assert_eq!(second, b"second");
}

#[tokio::test]
async fn test_localStore_putText_shouldOverwriteExistingObject() {
    let dir = create_temp_dir().unwrap();
    let store = LocalObjectStore::new(dir.path());

    store.put_text("alice", "content-1", "v1").await.unwrap();
    let path = store.put_text("alice", "content-1", "v2").await.unwrap();

    let written = std::fs::read_to_string(dir.path().join(&path)).unwrap();
    assert_eq!(written, "v2");
}
