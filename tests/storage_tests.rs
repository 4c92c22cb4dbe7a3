//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use chrono::Utc;
use linkdrop::services::CodeLookup;
use linkdrop::storage::backend::{SeaOrmStorage, infer_backend_from_url};
use linkdrop::storage::{ActivityRecord, NewFile, NewLink};
use tempfile::TempDir;

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        short_code: code.to_string(),
        long_url: url.to_string(),
        title: None,
        created_at: Utc::now(),
    }
}

fn new_file(name: &str, content: &[u8]) -> NewFile {
    let uploaded_at = Utc::now();
    NewFile {
        stored_name: format!("{}_{}", uploaded_at.timestamp(), name),
        original_name: name.to_string(),
        content: content.to_vec(),
        content_type: "application/octet-stream".to_string(),
        uploaded_at,
    }
}

// =============================================================================
// 链接表
// =============================================================================

#[tokio::test]
async fn test_insert_and_get_link() {
    let (storage, _dir) = create_temp_storage().await;

    let link = storage
        .insert_link(&new_link("abc123", "https://example.com"))
        .await
        .unwrap()
        .expect("code should be free");

    assert!(link.id > 0);
    assert_eq!(link.clicks, 0);
    assert!(link.last_access.is_none());

    let fetched = storage.get_link("abc123").await.unwrap().unwrap();
    assert_eq!(fetched, link);
    assert!(storage.get_link("nope00").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_code_rejected_by_unique_index() {
    let (storage, _dir) = create_temp_storage().await;

    storage
        .insert_link(&new_link("dup001", "https://a.example.com"))
        .await
        .unwrap()
        .unwrap();

    let second = storage
        .insert_link(&new_link("dup001", "https://b.example.com"))
        .await
        .unwrap();
    assert!(second.is_none());

    let kept = storage.get_link("dup001").await.unwrap().unwrap();
    assert_eq!(kept.long_url, "https://a.example.com");
    assert_eq!(storage.count_links().await.unwrap(), 1);
}

#[tokio::test]
async fn test_code_lookup() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .insert_link(&new_link("taken1", "https://example.com"))
        .await
        .unwrap();

    assert!(storage.code_exists("taken1").await.unwrap());
    assert!(!storage.code_exists("free01").await.unwrap());
}

#[tokio::test]
async fn test_record_access_increments() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .insert_link(&new_link("hit001", "https://example.com/x"))
        .await
        .unwrap();

    for _ in 0..3 {
        let url = storage.record_access("hit001", Utc::now()).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com/x"));
    }

    let link = storage.get_link("hit001").await.unwrap().unwrap();
    assert_eq!(link.clicks, 3);
    assert!(link.last_access.is_some());
}

#[tokio::test]
async fn test_record_access_unknown_code() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .insert_link(&new_link("known1", "https://example.com"))
        .await
        .unwrap();

    assert!(storage.record_access("zzzzzz", Utc::now()).await.unwrap().is_none());

    let link = storage.get_link("known1").await.unwrap().unwrap();
    assert_eq!(link.clicks, 0);
    assert!(link.last_access.is_none());
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let (storage, _dir) = create_temp_storage().await;

    let base = Utc::now();
    for (i, code) in ["first1", "second", "third3"].iter().enumerate() {
        let mut link = new_link(code, "https://example.com");
        link.created_at = base + chrono::Duration::seconds(i as i64);
        storage.insert_link(&link).await.unwrap();
    }

    let codes: Vec<String> = storage
        .list_links()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.short_code)
        .collect();
    assert_eq!(codes, vec!["third3", "second", "first1"]);
}

#[tokio::test]
async fn test_list_links_ties_broken_by_id() {
    let (storage, _dir) = create_temp_storage().await;

    let same_time = Utc::now();
    for code in ["tie001", "tie002", "tie003"] {
        let mut link = new_link(code, "https://example.com");
        link.created_at = same_time;
        storage.insert_link(&link).await.unwrap();
    }

    let first = storage.list_links().await.unwrap();
    let second = storage.list_links().await.unwrap();
    assert_eq!(first, second);

    let codes: Vec<&str> = first.iter().map(|l| l.short_code.as_str()).collect();
    assert_eq!(codes, vec!["tie003", "tie002", "tie001"]);
}

// =============================================================================
// 文件表
// =============================================================================

#[tokio::test]
async fn test_insert_and_get_file() {
    let (storage, _dir) = create_temp_storage().await;

    let content: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let stored = storage
        .insert_file(&new_file("blob.zip", &content))
        .await
        .unwrap();

    assert_eq!(stored.size, 4096);

    let fetched = storage.get_file(stored.id).await.unwrap().unwrap();
    assert_eq!(fetched.content, content);
    assert_eq!(fetched.original_name, "blob.zip");
    assert!(fetched.stored_name.ends_with("_blob.zip"));

    assert!(storage.get_file(stored.id + 1000).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_summaries_projection_and_order() {
    let (storage, _dir) = create_temp_storage().await;

    let a = storage.insert_file(&new_file("a.txt", b"aaa")).await.unwrap();
    let b = storage.insert_file(&new_file("b.txt", b"bbbbb")).await.unwrap();

    let summaries = storage.list_file_summaries().await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, b.id);
    assert_eq!(summaries[0].size, 5);
    assert_eq!(summaries[1].id, a.id);
    assert_eq!(summaries[1].name, "a.txt");

    assert_eq!(summaries, storage.list_file_summaries().await.unwrap());
}

// =============================================================================
// 计数与审计
// =============================================================================

#[tokio::test]
async fn test_counts_follow_writes() {
    let (storage, _dir) = create_temp_storage().await;

    assert_eq!(storage.count_links().await.unwrap(), 0);
    assert_eq!(storage.count_files().await.unwrap(), 0);

    storage
        .insert_link(&new_link("cnt001", "https://example.com"))
        .await
        .unwrap();
    storage.insert_file(&new_file("c.txt", b"c")).await.unwrap();

    assert_eq!(storage.count_links().await.unwrap(), 1);
    assert_eq!(storage.count_files().await.unwrap(), 1);
}

#[tokio::test]
async fn test_append_activity() {
    let (storage, _dir) = create_temp_storage().await;

    storage
        .append_activity(&ActivityRecord {
            action: "link_create".to_string(),
            entity_type: Some("link".to_string()),
            entity_id: Some(1),
            details: None,
        })
        .await
        .unwrap();

    assert_eq!(storage.count_activity().await.unwrap(), 1);
}

#[tokio::test]
async fn test_backend_config_and_ping() {
    let (storage, _dir) = create_temp_storage().await;
    assert_eq!(storage.get_backend_config().storage_type, "sqlite");
    assert!(storage.ping().await.is_ok());
    assert_eq!(
        infer_backend_from_url("sqlite://x.db?mode=rwc").unwrap(),
        "sqlite"
    );
}
