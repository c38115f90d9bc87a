//! Integration tests for fetching documents over HTTP.
//!
//! Each test serves fixtures from an in-process axum server bound to an
//! ephemeral port.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use swagger_viewer_core::{DocumentFetcher, SpecFlavor, search_endpoints};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const SWAGGER_JSON: &str = r##"{
    "swagger": "2.0",
    "info": {"title": "Users", "version": "1.0"},
    "paths": {
        "/users/{id}": {
            "parameters": [{"$ref": "#/parameters/UserId"}],
            "get": {"summary": "Get user", "operationId": "getUser"},
            "delete": {"summary": "Delete user"}
        },
        "/users": {
            "get": {"summary": "List users"}
        }
    },
    "parameters": {
        "UserId": {"name": "id", "in": "path", "required": true, "type": "string"}
    }
}"##;

const OPENAPI_YAML: &str = r"openapi: 3.0.3
info:
  title: Orders
  version: '2.1'
paths:
  /orders:
    post:
      summary: Create order
      requestBody:
        content:
          application/json:
            schema:
              type: object
      responses:
        '201':
          description: Created
";

struct TestServer {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let app = Router::new()
            .route("/v2/swagger.json", get(|| async { SWAGGER_JSON }))
            .route("/openapi.yaml", get(|| async { OPENAPI_YAML }))
            .route("/broken.json", get(|| async { "{ \"swagger\": " }))
            .route(
                "/error.json",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local_addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        tokio::spawn(async move { server.await });

        Self {
            base_url: format!("http://{addr}"),
            shutdown: Some(shutdown_tx),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Fetches a Swagger 2.0 JSON document and resolves its shared parameters.
#[tokio::test]
async fn test_fetch_swagger_json() {
    let server = TestServer::start().await;
    let fetcher = DocumentFetcher::new();

    let doc = fetcher
        .try_fetch(&server.url("/v2/swagger.json"))
        .await
        .unwrap();

    assert_eq!(doc.flavor(), SpecFlavor::Swagger2);
    assert_eq!(doc.endpoint_count(), 3);

    let get_user = doc.find_endpoint("/users/{id}", "get").unwrap();
    assert_eq!(get_user.parameters.len(), 1);
    assert_eq!(get_user.parameters[0].name, "id");

    let summaries = doc.endpoint_summaries();
    assert_eq!(summaries[0].path, "/users/{id}");
    assert_eq!(summaries[0].methods, vec!["get", "delete"]);
    assert_eq!(summaries[1].path, "/users");
}

/// Fetches an OpenAPI 3.0 YAML document.
#[tokio::test]
async fn test_fetch_openapi_yaml() {
    let server = TestServer::start().await;
    let doc = DocumentFetcher::new()
        .try_fetch(&server.url("/openapi.yaml"))
        .await
        .unwrap();

    assert_eq!(doc.flavor(), SpecFlavor::OpenApi3);
    assert_eq!(doc.version(), Some("2.1"));

    let create = doc.find_endpoint("/orders", "POST").unwrap();
    assert!(create.request_body.is_some());
}

/// Non-success statuses are fetch errors.
#[tokio::test]
async fn test_http_error_status() {
    let server = TestServer::start().await;
    let fetcher = DocumentFetcher::new();

    let err = fetcher
        .try_fetch(&server.url("/error.json"))
        .await
        .unwrap_err();
    assert!(err.is_fetch_error());

    let err = fetcher
        .try_fetch(&server.url("/not-there.json"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("404"));
}

/// A truncated body is neither JSON nor YAML.
#[tokio::test]
async fn test_unparseable_body_collapses_to_none() {
    let server = TestServer::start().await;
    let fetcher = DocumentFetcher::new();

    let err = fetcher
        .try_fetch(&server.url("/broken.json"))
        .await
        .unwrap_err();
    assert!(err.is_parse_error());
    assert!(fetcher.fetch(&server.url("/broken.json")).await.is_none());
}

/// Unreachable hosts yield no document rather than an error.
#[tokio::test]
async fn test_unreachable_host() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = DocumentFetcher::new();
    let doc = fetcher.fetch(&format!("http://{addr}/doc.json")).await;
    assert!(doc.is_none());
}

/// Search over a fetched document.
#[tokio::test]
async fn test_search_fetched_document() {
    let server = TestServer::start().await;
    let doc = DocumentFetcher::new()
        .fetch(&server.url("/v2/swagger.json"))
        .await;

    let results = search_endpoints(doc.as_ref(), "user");
    let methods: Vec<_> = results.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec!["GET", "DELETE", "GET"]);

    let results = search_endpoints(doc.as_ref(), "getuser");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].summary.as_deref(), Some("Get user"));
}
