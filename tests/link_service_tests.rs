//! LinkService integration tests
//!
//! 创建、解析与并发点击计数，使用临时 SQLite 数据库。

use std::sync::Arc;

use linkdrop::errors::LinkdropError;
use linkdrop::services::{CodeGenerator, CreateLinkRequest, LinkService};
use linkdrop::storage::backend::SeaOrmStorage;
use tempfile::TempDir;

const BASE_URL: &str = "http://s.test";

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("links.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

async fn create_service() -> (LinkService, Arc<SeaOrmStorage>, TempDir) {
    let (storage, dir) = create_temp_storage().await;
    let service = LinkService::new(storage.clone(), CodeGenerator::new(6, 10), BASE_URL);
    (service, storage, dir)
}

fn request(url: &str) -> CreateLinkRequest {
    CreateLinkRequest {
        url: url.to_string(),
        title: None,
    }
}

// =============================================================================
// 创建
// =============================================================================

#[tokio::test]
async fn test_create_then_resolve() {
    let (service, _storage, _dir) = create_service().await;

    let created = service
        .create_link(request("https://example.com/a/long/path"))
        .await
        .unwrap();

    let code = created.link.short_code.clone();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(created.short_url, format!("{}/r/{}", BASE_URL, code));
    assert_eq!(created.link.clicks, 0);

    let target = service.resolve(&code).await.unwrap();
    assert_eq!(target, "https://example.com/a/long/path");

    let link = service.get_link(&code).await.unwrap();
    assert_eq!(link.clicks, 1);
    assert!(link.last_access.is_some());
}

#[tokio::test]
async fn test_create_keeps_title() {
    let (service, _storage, _dir) = create_service().await;

    let created = service
        .create_link(CreateLinkRequest {
            url: "https://docs.example.com".to_string(),
            title: Some("  Docs  ".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.link.title.as_deref(), Some("Docs"));
}

#[tokio::test]
async fn test_create_rejects_invalid_url() {
    let (service, _storage, _dir) = create_service().await;

    for bad in ["not-a-url", "", "javascript:alert(1)", "ftp://example.com/x"] {
        let result = service.create_link(request(bad)).await;
        assert!(
            matches!(result, Err(LinkdropError::Validation(_))),
            "expected validation error for {:?}",
            bad
        );
    }
    assert_eq!(service.count_links().await.unwrap(), 0);
}

#[tokio::test]
async fn test_exhausted_code_space_is_typed_failure() {
    let (storage, _dir) = create_temp_storage().await;
    // 字符集只有一个字符，第二次创建必然耗尽
    let service = LinkService::new(
        storage.clone(),
        CodeGenerator::with_alphabet(b"a", 1, 3),
        BASE_URL,
    );

    let first = service.create_link(request("https://example.com/1")).await.unwrap();
    assert_eq!(first.link.short_code, "a");

    let second = service.create_link(request("https://example.com/2")).await;
    assert!(matches!(second, Err(LinkdropError::CodeSpaceExhausted(_))));
    assert_eq!(storage.count_links().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_in_small_code_space() {
    let (storage, _dir) = create_temp_storage().await;
    // 16 个可用短码，并发创建时预检查与插入之间经常被抢占
    let service = Arc::new(LinkService::new(
        storage.clone(),
        CodeGenerator::with_alphabet(b"ab", 4, 64),
        BASE_URL,
    ));

    const TASKS: usize = 12;

    let mut handles = Vec::with_capacity(TASKS);
    for i in 0..TASKS {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_link(request(&format!("https://example.com/{}", i)))
                .await
        }));
    }

    let mut codes = std::collections::HashSet::new();
    for handle in handles {
        let created = handle.await.unwrap().expect("create_link should succeed");
        assert_eq!(created.link.short_code.len(), 4);
        assert!(codes.insert(created.link.short_code));
    }

    assert_eq!(codes.len(), TASKS);
    assert_eq!(storage.count_links().await.unwrap(), TASKS as u64);
}

#[tokio::test]
async fn test_create_records_activity() {
    let (service, storage, _dir) = create_service().await;

    service.create_link(request("https://example.com")).await.unwrap();
    service.create_link(request("https://example.org")).await.unwrap();

    assert_eq!(storage.count_activity().await.unwrap(), 2);
}

// =============================================================================
// 解析与点击计数
// =============================================================================

#[tokio::test]
async fn test_sequential_clicks_are_counted() {
    let (service, _storage, _dir) = create_service().await;
    let code = service
        .create_link(request("https://example.com"))
        .await
        .unwrap()
        .link
        .short_code;

    for _ in 0..25 {
        service.resolve(&code).await.unwrap();
    }

    assert_eq!(service.get_link(&code).await.unwrap().clicks, 25);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clicks_are_not_lost() {
    let (service, _storage, _dir) = create_service().await;
    let service = Arc::new(service);
    let code = service
        .create_link(request("https://example.com/hot"))
        .await
        .unwrap()
        .link
        .short_code;

    const TASKS: usize = 8;
    const PER_TASK: usize = 25;

    let mut handles = Vec::with_capacity(TASKS);
    for _ in 0..TASKS {
        let service = service.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..PER_TASK {
                let target = service.resolve(&code).await.unwrap();
                assert_eq!(target, "https://example.com/hot");
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let link = service.get_link(&code).await.unwrap();
    assert_eq!(link.clicks, (TASKS * PER_TASK) as u64);
}

#[tokio::test]
async fn test_resolve_unknown_code_mutates_nothing() {
    let (service, _storage, _dir) = create_service().await;
    let code = service
        .create_link(request("https://example.com"))
        .await
        .unwrap()
        .link
        .short_code;
    let before = service.list_links().await.unwrap();

    let result = service.resolve("zzzzzz").await;
    assert!(matches!(result, Err(LinkdropError::NotFound(_))));

    let after = service.list_links().await.unwrap();
    assert_eq!(before, after);
    let link = service.get_link(&code).await.unwrap();
    assert_eq!(link.clicks, 0);
    assert!(link.last_access.is_none());
}

#[tokio::test]
async fn test_resolve_malformed_code_is_not_found() {
    let (service, _storage, _dir) = create_service().await;

    for code in ["", "has space", "../etc", &"x".repeat(64)] {
        assert!(matches!(
            service.resolve(code).await,
            Err(LinkdropError::NotFound(_))
        ));
    }
}

// =============================================================================
// 列表
// =============================================================================

#[tokio::test]
async fn test_list_is_stable_and_complete() {
    let (service, _storage, _dir) = create_service().await;

    let mut created = Vec::new();
    for i in 0..5 {
        let result = service
            .create_link(request(&format!("https://example.com/{}", i)))
            .await
            .unwrap();
        created.push(result.link.short_code);
    }

    let first = service.list_links().await.unwrap();
    let second = service.list_links().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);

    // 最新的在前
    assert_eq!(first[0].short_code, created[4]);
    assert_eq!(first[4].short_code, created[0]);
    assert_eq!(service.count_links().await.unwrap(), 5);
}
