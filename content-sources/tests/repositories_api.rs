//! End-to-end tests for the repository endpoints against a mocked store

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;

use content_sources::{
    app,
    config::Config,
    handlers::INTERNAL_ERROR_MESSAGE,
    identity::{Identity, IDENTITY_HEADER},
    middleware,
    models::{RepositoryRequest, RepositoryResponse},
    repository::{FilterData, PageWindow, RepositoryStore, RepositoryStoreError, StoreResult},
    state::AppState,
};

const MOCK_ORG_ID: &str = "1111";
const MOCK_ACCOUNT_NUMBER: &str = "0000";
const REPOSITORIES: &str = "/api/content-sources/v1/repositories/";

mock! {
    pub Store {}

    #[async_trait]
    impl RepositoryStore for Store {
        async fn create(
            &self,
            org_id: &str,
            request: RepositoryRequest,
        ) -> StoreResult<RepositoryResponse>;
        async fn update(
            &self,
            org_id: &str,
            uuid: &str,
            request: RepositoryRequest,
        ) -> StoreResult<RepositoryResponse>;
        async fn fetch(&self, org_id: &str, uuid: &str) -> StoreResult<RepositoryResponse>;
        async fn list(
            &self,
            org_id: &str,
            window: PageWindow,
            filter: &FilterData,
        ) -> StoreResult<(Vec<RepositoryResponse>, u64)>;
        async fn delete(&self, org_id: &str, uuid: &str) -> StoreResult<()>;
    }
}

fn router(store: MockStore) -> Router {
    app(AppState::new(Config::default(), Arc::new(store)))
}

fn repository(i: u64) -> RepositoryResponse {
    RepositoryResponse {
        uuid: format!("uuid-{:03}", i),
        name: format!("repo_{:03}", i),
        url: format!("https://example.com/repo-{}", i),
        distribution_versions: vec!["any".to_string()],
        distribution_arch: "any".to_string(),
        account_id: MOCK_ACCOUNT_NUMBER.to_string(),
        org_id: MOCK_ORG_ID.to_string(),
    }
}

fn page(window: PageWindow, total: u64) -> Vec<RepositoryResponse> {
    (window.offset..total.min(window.offset.saturating_add(window.limit)))
        .map(repository)
        .collect()
}

fn identity_header() -> String {
    Identity::new(MOCK_ACCOUNT_NUMBER, MOCK_ORG_ID).encode()
}

async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(IDENTITY_HEADER, identity_header());
    send_request(router, builder, body).await
}

async fn send_request(
    router: Router,
    builder: axum::http::request::Builder,
    body: Option<String>,
) -> (StatusCode, HeaderMap, Value) {
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, value)
}

fn offset_of(link: &Value) -> u64 {
    link.as_str()
        .unwrap()
        .rsplit("offset=")
        .next()
        .unwrap()
        .parse()
        .unwrap()
}

#[tokio::test]
async fn test_list_single_repository() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .withf(|org_id, window, filter| {
            org_id == MOCK_ORG_ID && *window == PageWindow::new(10, 0) && filter.is_empty()
        })
        .times(1)
        .returning(|_, _, _| Ok((vec![repository(0)], 1)));

    let uri = format!("{}?limit=10", REPOSITORIES);
    let (status, _, body) = send(router(store), Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "repo_000");
    assert_eq!(body["meta"], json!({"count": 1, "offset": 0, "limit": 10}));

    let first = format!("{}?limit=10&offset=0", REPOSITORIES);
    assert_eq!(body["links"]["first"], first.as_str());
    assert_eq!(body["links"]["last"], first.as_str());
    assert!(body["links"].get("next").is_none());
    assert!(body["links"].get("previous").is_none());
}

#[tokio::test]
async fn test_list_no_repositories() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .withf(|_, window, _| *window == PageWindow::new(100, 0))
        .times(1)
        .returning(|_, _, _| Ok((Vec::new(), 0)));

    let (status, _, body) = send(router(store), Method::GET, REPOSITORIES, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["count"], 0);
    assert_eq!(body["meta"]["limit"], 100);
    assert_eq!(body["meta"]["offset"], 0);

    let expected = format!("{}?limit=100&offset=0", REPOSITORIES);
    assert_eq!(body["links"]["first"], expected.as_str());
    assert_eq!(body["links"]["last"], expected.as_str());
}

#[tokio::test]
async fn test_list_paged_extra_remaining() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .times(2)
        .returning(|_, window, _| Ok((page(window, 102), 102)));
    let router = router(store);

    let uri = format!("{}?limit=10", REPOSITORIES);
    let (status, _, body) = send(router.clone(), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(offset_of(&body["links"]["last"]), 100);
    assert_eq!(offset_of(&body["links"]["next"]), 10);

    let last = body["links"]["last"].as_str().unwrap().to_string();
    let (status, _, body) = send(router, Method::GET, &last, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["offset"], 100);
    assert!(body["links"].get("next").is_none());
    assert_eq!(offset_of(&body["links"]["previous"]), 90);
}

#[tokio::test]
async fn test_list_paged_no_remaining() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .times(2)
        .returning(|_, window, _| Ok((page(window, 100), 100)));
    let router = router(store);

    let uri = format!("{}?limit=10", REPOSITORIES);
    let (_, _, body) = send(router.clone(), Method::GET, &uri, None).await;
    assert_eq!(offset_of(&body["links"]["last"]), 90);

    let last = body["links"]["last"].as_str().unwrap().to_string();
    let (status, _, body) = send(router, Method::GET, &last, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert!(body["links"].get("next").is_none());
}

#[tokio::test]
async fn test_list_malformed_window_uses_defaults() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .withf(|_, window, _| *window == PageWindow::new(100, 0))
        .times(1)
        .returning(|_, _, _| Ok((Vec::new(), 0)));

    let uri = format!("{}?limit=abc&offset=-4", REPOSITORIES);
    let (status, _, body) = send(router(store), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["limit"], 100);
}

#[tokio::test]
async fn test_list_repeated_window_keys_use_first_value() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .withf(|_, window, _| *window == PageWindow::new(10, 0))
        .times(1)
        .returning(|_, _, _| Ok((Vec::new(), 0)));

    let uri = format!("{}?limit=10&limit=20&offset=bad&offset=30", REPOSITORIES);
    let (status, _, body) = send(router(store), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["limit"], 10);
    assert_eq!(body["meta"]["offset"], 0);
}

#[tokio::test]
async fn test_list_passes_filters() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .withf(|_, _, filter| {
            filter.search.as_deref() == Some("epel")
                && filter.arch.as_deref() == Some("x86_64")
                && filter.versions == vec!["8".to_string(), "9".to_string()]
        })
        .times(1)
        .returning(|_, _, _| Ok((Vec::new(), 0)));

    let uri = format!("{}?search=epel&arch=x86_64&version=8,9", REPOSITORIES);
    let (status, _, _) = send(router(store), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_internal_error_is_generic() {
    let mut store = MockStore::new();
    store
        .expect_list()
        .times(1)
        .returning(|_, _, _| Err(RepositoryStoreError::internal("db password rejected")));

    let (status, _, body) = send(router(store), Method::GET, REPOSITORIES, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert!(!body.to_string().contains("password"));
}

#[tokio::test]
async fn test_fetch() {
    let mut store = MockStore::new();
    store
        .expect_fetch()
        .withf(|org_id, uuid| org_id == MOCK_ORG_ID && uuid == "uuid-007")
        .times(1)
        .returning(|_, _| Ok(repository(7)));

    let uri = format!("{}uuid-007", REPOSITORIES);
    let (status, _, body) = send(router(store), Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    let fetched: RepositoryResponse = serde_json::from_value(body).unwrap();
    assert_eq!(fetched, repository(7));
}

#[tokio::test]
async fn test_fetch_not_found() {
    let mut store = MockStore::new();
    store.expect_fetch().times(1).returning(|_, uuid| {
        Err(RepositoryStoreError::not_found(format!(
            "Could not find repository with UUID {}",
            uuid
        )))
    });

    let uri = format!("{}missing", REPOSITORIES);
    let (status, _, body) = send(router(store), Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Could not find repository with UUID missing");
    assert_eq!(body["status"], 404);
    assert_eq!(body["operation"], "fetch");
}

#[tokio::test]
async fn test_create() {
    let mut store = MockStore::new();
    store
        .expect_create()
        .withf(|org_id, request| {
            org_id == MOCK_ORG_ID
                && request.name.as_deref() == Some("repo_000")
                && request.account_id.as_deref() == Some(MOCK_ACCOUNT_NUMBER)
                && request.org_id.as_deref() == Some(MOCK_ORG_ID)
                && request.distribution_arch.as_deref() == Some("any")
                && request.distribution_versions == Some(vec!["any".to_string()])
        })
        .times(1)
        .returning(|_, _| Ok(repository(0)));

    let body = json!({
        "name": "repo_000",
        "url": "https://example.com/repo-0",
        "org_id": "9999",
        "account_id": "spoofed"
    });
    let (status, headers, body) =
        send(router(store), Method::POST, REPOSITORIES, Some(body.to_string())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        "/api/content-sources/v1/repositories/uuid-000"
    );
    assert_eq!(body["uuid"], "uuid-000");
    assert_eq!(body["org_id"], MOCK_ORG_ID);
}

#[tokio::test]
async fn test_create_already_exists() {
    let mut store = MockStore::new();
    store.expect_create().times(1).returning(|_, _| {
        Err(RepositoryStoreError::bad_validation(
            "Repository with name 'repo_000' already belongs to organization",
        ))
    });

    let body = json!({"name": "repo_000", "url": "https://example.com/repo-0"});
    let (status, _, body) =
        send(router(store), Method::POST, REPOSITORIES, Some(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Repository with name 'repo_000' already belongs to organization"
    );
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_malformed_body() {
    let mut store = MockStore::new();
    store.expect_create().never();

    let (status, _, body) = send(
        router(store),
        Method::POST,
        REPOSITORIES,
        Some("{\"name\": ".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["operation"], "create");
}

#[tokio::test]
async fn test_delete() {
    let mut store = MockStore::new();
    store
        .expect_delete()
        .withf(|org_id, uuid| org_id == MOCK_ORG_ID && uuid == "uuid-001")
        .times(1)
        .returning(|_, _| Ok(()));

    let uri = format!("{}uuid-001", REPOSITORIES);
    let (status, _, body) = send(router(store), Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_delete_not_found() {
    let mut store = MockStore::new();
    store
        .expect_delete()
        .times(1)
        .returning(|_, _| Err(RepositoryStoreError::not_found("Could not find repository")));

    let uri = format!("{}uuid-001", REPOSITORIES);
    let (status, _, _) = send(router(store), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_update_fills_defaults() {
    let mut store = MockStore::new();
    store
        .expect_update()
        .withf(|org_id, uuid, request| {
            org_id == MOCK_ORG_ID
                && uuid == "uuid-002"
                && request.name.as_deref() == Some("renamed")
                && request.distribution_arch.as_deref() == Some("any")
                && request.distribution_versions == Some(vec!["any".to_string()])
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(RepositoryResponse {
                name: "renamed".to_string(),
                ..repository(2)
            })
        });

    let uri = format!("{}uuid-002", REPOSITORIES);
    let body = json!({"name": "renamed", "url": "https://example.com/repo-2"});
    let (status, _, body) = send(router(store), Method::PUT, &uri, Some(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "renamed");
}

#[tokio::test]
async fn test_partial_update_sends_only_supplied_fields() {
    let mut store = MockStore::new();
    store
        .expect_update()
        .withf(|_, uuid, request| {
            uuid == "uuid-003"
                && request.name.as_deref() == Some("renamed")
                && request.url.is_none()
                && request.distribution_arch.is_none()
                && request.distribution_versions.is_none()
        })
        .times(1)
        .returning(|_, _, _| Ok(repository(3)));

    let uri = format!("{}uuid-003", REPOSITORIES);
    let body = json!({"name": "renamed"});
    let (status, _, _) = send(router(store), Method::PATCH, &uri, Some(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_not_found() {
    let mut store = MockStore::new();
    store
        .expect_update()
        .times(1)
        .returning(|_, _, _| Err(RepositoryStoreError::not_found("Could not find repository")));

    let uri = format!("{}uuid-404", REPOSITORIES);
    let body = json!({"name": "renamed"});
    let (status, _, body) = send(router(store), Method::PATCH, &uri, Some(body.to_string())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["operation"], "partial_update");
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let store = MockStore::new();

    let builder = Request::builder().method(Method::GET).uri(REPOSITORIES);
    let (status, _, body) = send_request(router(store), builder, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_identity_is_bad_request() {
    let store = MockStore::new();

    let builder = Request::builder()
        .method(Method::DELETE)
        .uri(format!("{}uuid-001", REPOSITORIES))
        .header(IDENTITY_HEADER, "definitely not base64!");
    let (status, _, _) = send_request(router(store), builder, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ping_needs_no_identity() {
    let builder = Request::builder()
        .method(Method::GET)
        .uri("/api/content-sources/v1/ping/");
    let (status, _, body) = send_request(router(MockStore::new()), builder, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "pong"}));
}

#[tokio::test]
async fn test_custom_path_prefix() {
    let mut config = Config::default();
    config.api.path_prefix = "/api/custom/v9/".to_string();

    let mut store = MockStore::new();
    store
        .expect_list()
        .times(1)
        .returning(|_, _, _| Ok((Vec::new(), 0)));
    let router = app(AppState::new(config, Arc::new(store)));

    let (status, _, body) = send(router, Method::GET, "/api/custom/v9/repositories/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["links"]["first"],
        "/api/custom/v9/repositories/?limit=100&offset=0"
    );
}

#[tokio::test]
async fn test_middleware_sets_request_id() {
    let config = Config::default();
    let router = middleware::apply(
        app(AppState::new(config.clone(), Arc::new(MockStore::new()))),
        &config,
    );

    let builder = Request::builder()
        .method(Method::GET)
        .uri("/api/content-sources/v1/ping/");
    let (status, headers, _) = send_request(router, builder, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key(middleware::REQUEST_ID_HEADER));
}
