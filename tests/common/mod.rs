use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use catalog_api::{
    config::AppConfig, handlers::health::health_routes, services::store::CatalogStore,
    api_v1_routes, AppState,
};

pub const ADMIN_TOKEN: &str = "integration-test-admin-token";

/// Helper harness for spinning up an application state backed by a
/// temp-directory catalog document.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _tmp: TempDir,
}

impl TestApp {
    /// Construct a new test application with an empty catalog.
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let catalog_path = tmp.path().join("catalog.json");

        let cfg = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            catalog_path: catalog_path.display().to_string(),
            admin_token: ADMIN_TOKEN.to_string(),
            cors_allowed_origins: None,
        };

        let catalog = CatalogStore::load(catalog_path).await;
        let state = AppState {
            config: cfg,
            catalog,
        };

        let router = Router::new()
            .merge(health_routes())
            .nest("/api/v1", api_v1_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _tmp: tmp,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        self.request(method, uri, body, Some(ADMIN_TOKEN)).await
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
