//! Data provider behaviour against a mocked content API.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;
use url::Url;
use vitrine_core::{
    GalleryError, Result,
    provider::{
        CacheEntry, CacheStore, ContentApiClient, ContentApiSettings,
        ContentPage, ContentSource, DataProvider, FailureKind, FetchSource,
        FetchStatus, MemoryCacheStore, NullCacheStore, ProviderSettings,
    },
};
use vitrine_model::{Item, ItemId};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const API_PATH: &str = "/api/v1/photos";
const KEY: &str = "test-key";

fn record(id: usize) -> serde_json::Value {
    json!({
        "id": format!("p{id}"),
        "title": format!("Photo {id}"),
        "body": "<p>caption</p>",
        "shootingdate": "2023-11-03T15:00:00.000Z",
        "photo": { "url": format!("https://images.example/{id}.jpg"), "width": 1600, "height": 1200 },
        "createdAt": "2024-01-01T00:00:00.000Z"
    })
}

fn page(ids: std::ops::Range<usize>, total: Option<usize>) -> serde_json::Value {
    let offset = ids.start;
    let contents: Vec<_> = ids.map(record).collect();
    let mut body = json!({
        "contents": contents,
        "offset": offset,
        "limit": 2,
    });
    if let Some(total) = total {
        body["totalCount"] = json!(total);
    }
    body
}

fn client(server: &MockServer, key: Option<&str>) -> Arc<ContentApiClient> {
    let endpoint = Url::parse(&format!("{}{API_PATH}", server.uri())).unwrap();
    let settings = ContentApiSettings::new(endpoint, key.map(str::to_string));
    Arc::new(ContentApiClient::new(settings).unwrap())
}

fn settings(page_size: usize) -> ProviderSettings {
    ProviderSettings {
        page_size,
        ..ProviderSettings::default()
    }
}

async fn mount_page(
    server: &MockServer,
    offset: usize,
    body: serde_json::Value,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(header("X-MICROCMS-API-KEY", KEY))
        .and(query_param("limit", "2"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn pages_until_total_count_is_reached() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page(0..2, Some(5)), 1).await;
    mount_page(&server, 2, page(2..4, Some(5)), 1).await;
    mount_page(&server, 4, page(4..5, Some(5)), 1).await;
    mount_page(&server, 5, page(5..5, Some(5)), 0).await;

    let provider = DataProvider::new(
        client(&server, Some(KEY)),
        Arc::new(NullCacheStore),
        settings(2),
    );
    let outcome = provider.fetch(true).await.unwrap();

    assert_eq!(outcome.source, FetchSource::Network);
    let ids: Vec<_> = outcome.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["p0", "p1", "p2", "p3", "p4"]);
    assert_eq!(outcome.items[0].photo.as_ref().unwrap().width, Some(1600));

    let snapshot = provider.snapshot();
    assert_eq!(snapshot.status, FetchStatus::Ready);
    assert_eq!(snapshot.items.len(), 5);
    assert!(snapshot.last_updated.is_some());
}

#[tokio::test]
async fn missing_total_count_pages_until_empty() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page(0..2, None), 1).await;
    mount_page(&server, 2, page(2..3, None), 1).await;
    mount_page(&server, 3, page(3..3, None), 1).await;

    let provider = DataProvider::new(
        client(&server, Some(KEY)),
        Arc::new(NullCacheStore),
        settings(2),
    );
    let outcome = provider.fetch(false).await.unwrap();
    assert_eq!(outcome.items.len(), 3);
}

#[tokio::test]
async fn empty_first_page_yields_empty_list() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page(0..0, Some(0)), 1).await;

    let provider = DataProvider::new(
        client(&server, Some(KEY)),
        Arc::new(NullCacheStore),
        settings(2),
    );
    let outcome = provider.fetch(false).await.unwrap();
    assert!(outcome.items.is_empty());
    assert_eq!(provider.status(), FetchStatus::Ready);
}

#[tokio::test]
async fn non_success_status_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = DataProvider::new(
        client(&server, Some(KEY)),
        Arc::new(NullCacheStore),
        settings(2),
    );
    let err = provider.fetch(false).await.unwrap_err();
    match err {
        GalleryError::Http { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let failure = provider.status().failure().cloned().unwrap();
    assert_eq!(failure.kind, FailureKind::Http { status: 401 });
    assert!(provider.items().is_empty());
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let provider = DataProvider::new(
        client(&server, Some(KEY)),
        Arc::new(NullCacheStore),
        settings(2),
    );
    let err = provider.fetch(false).await.unwrap_err();
    assert!(matches!(err, GalleryError::InvalidResponse(_)));
}

#[tokio::test]
async fn missing_credential_fails_before_cache_and_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cache = Arc::new(MemoryCacheStore::new());
    let cached = CacheEntry::new(
        vec![Item::new(ItemId::new("cached").unwrap(), "cached")],
        chrono::Utc::now(),
    );
    let defaults = ProviderSettings::default();
    cache
        .put(&defaults.cache_key, &cached.to_bytes().unwrap())
        .await
        .unwrap();

    let provider =
        DataProvider::new(client(&server, None), cache, settings(2));
    let err = provider.fetch(true).await.unwrap_err();

    assert!(matches!(err, GalleryError::MissingCredential));
    let failure = provider.status().failure().cloned().unwrap();
    assert_eq!(failure.kind, FailureKind::Config);
    assert!(provider.items().is_empty());
}

#[tokio::test]
async fn network_result_is_written_to_cache() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page(0..2, Some(2)), 1).await;

    let cache = Arc::new(MemoryCacheStore::new());
    let provider =
        DataProvider::new(client(&server, Some(KEY)), cache.clone(), settings(2));
    provider.fetch(true).await.unwrap();

    let bytes = cache
        .get(&provider.settings().cache_key)
        .await
        .unwrap()
        .unwrap();
    let entry = CacheEntry::from_bytes(&bytes).unwrap();
    assert_eq!(entry.items.len(), 2);

    let again = provider.fetch(true).await.unwrap();
    assert_eq!(again.source, FetchSource::Cache);
}

/// Source whose first request hangs until the test releases it.
#[derive(Debug, Default)]
struct GatedSource {
    gate: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl ContentSource for GatedSource {
    fn has_credential(&self) -> bool {
        true
    }

    async fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<ContentPage> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            self.gate.notified().await;
        }
        let id = ItemId::new(format!("call-{call}")).unwrap();
        Ok(ContentPage {
            contents: vec![Item::new(id, "gated")],
            total_count: Some(1),
            offset,
            limit,
        })
    }
}

async fn wait_for_first_call(source: &GatedSource) {
    for _ in 0..200 {
        if source.calls.load(Ordering::SeqCst) > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("first request never started");
}

#[tokio::test]
async fn second_fetch_supersedes_the_first() {
    let source = Arc::new(GatedSource::default());
    let provider = Arc::new(DataProvider::new(
        source.clone(),
        Arc::new(NullCacheStore),
        settings(100),
    ));

    let first = tokio::spawn({
        let provider = provider.clone();
        async move { provider.fetch(false).await }
    });
    wait_for_first_call(&source).await;

    let second = provider.fetch(false).await.unwrap();
    assert_eq!(second.items[0].id.as_str(), "call-1");

    let first = first.await.unwrap();
    assert!(matches!(first, Err(GalleryError::Cancelled)));

    source.gate.notify_waiters();
    let snapshot = provider.snapshot();
    assert_eq!(snapshot.status, FetchStatus::Ready);
    assert_eq!(snapshot.items[0].id.as_str(), "call-1");
}

#[tokio::test]
async fn explicit_cancel_discards_the_result() {
    let source = Arc::new(GatedSource::default());
    let provider = Arc::new(DataProvider::new(
        source.clone(),
        Arc::new(NullCacheStore),
        settings(100),
    ));

    let pending = tokio::spawn({
        let provider = provider.clone();
        async move { provider.fetch(false).await }
    });
    wait_for_first_call(&source).await;
    assert_eq!(provider.status(), FetchStatus::Loading);

    assert!(provider.cancel());
    source.gate.notify_waiters();

    let result = pending.await.unwrap();
    assert!(result.unwrap_err().is_cancelled());
    assert_eq!(provider.status(), FetchStatus::Idle);
    assert!(provider.items().is_empty());
    assert!(!provider.cancel());
}
