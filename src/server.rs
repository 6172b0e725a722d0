//! Web server module for Panoptes.
//!
//! Provides the three read-only HTTP endpoints over the host list and the
//! probe pool.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::error::ApiError;
use crate::hosts::load_hosts;
use crate::probe::{ProbeOutcome, ProbePool};

/// Shared application state.
///
/// The probe pool is created once at process start; the host list is read
/// fresh from `hosts_path` on every request.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<ProbePool>,
    pub hosts_path: PathBuf,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let app_state = Arc::new(state);

    Router::new()
        .route("/", get(index_handler))
        .route("/hosts", get(hosts_handler))
        .route("/pings", get(pings_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Liveness placeholder. Always succeeds, regardless of the host file state.
async fn index_handler() -> &'static str {
    "Hello"
}

/// Raw host list, in file order.
async fn hosts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let hosts = load_hosts(&state.hosts_path).await?;
    Ok(Json(hosts))
}

/// Probe every listed host and return the keyed result set.
async fn pings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, ProbeOutcome>>, ApiError> {
    let hosts = load_hosts(&state.hosts_path).await?;
    let results = state.pool.probe_all(hosts).await;
    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeConfig;
    use crate::probe::Pinger;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;
    use tower::ServiceExt;

    /// Stub pinger returning a fixed latency for every host.
    struct FixedPinger(f64);

    #[async_trait::async_trait]
    impl Pinger for FixedPinger {
        async fn ping(&self, _host: &str, _probe_timeout: Duration) -> ProbeOutcome {
            ProbeOutcome::Latency(self.0)
        }
    }

    fn test_state(hosts_path: PathBuf) -> AppState {
        AppState {
            pool: Arc::new(ProbePool::new(
                &ProbeConfig::default(),
                Arc::new(FixedPinger(0.01)),
            )),
            hosts_path,
        }
    }

    async fn get_response(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn host_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_index_returns_hello() {
        let file = host_file("localhost\n");
        let app = create_router(test_state(file.path().to_path_buf()));

        let (status, body) = get_response(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Hello");
    }

    #[tokio::test]
    async fn test_index_unaffected_by_missing_host_file() {
        let app = create_router(test_state(PathBuf::from("/nonexistent/servers")));

        let (status, body) = get_response(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Hello");
    }

    #[tokio::test]
    async fn test_hosts_returns_file_order() {
        let file = host_file("localhost\n127.0.0.1\n");
        let app = create_router(test_state(file.path().to_path_buf()));

        let (status, body) = get_response(app, "/hosts").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!(["localhost", "127.0.0.1"]));
    }

    #[tokio::test]
    async fn test_pings_returns_one_entry_per_distinct_host() {
        let file = host_file("localhost\n127.0.0.1\nlocalhost\n");
        let app = create_router(test_state(file.path().to_path_buf()));

        let (status, body) = get_response(app, "/pings").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["localhost"], json!(0.01));
        assert_eq!(object["127.0.0.1"], json!(0.01));
    }

    #[tokio::test]
    async fn test_blank_host_lines_flow_through() {
        let file = host_file("localhost\n\n127.0.0.1\n");
        let app = create_router(test_state(file.path().to_path_buf()));

        let (status, body) = get_response(app.clone(), "/hosts").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!(["localhost", "", "127.0.0.1"]));

        let (status, body) = get_response(app, "/pings").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key(""));
    }

    #[tokio::test]
    async fn test_hosts_missing_file_is_500() {
        let app = create_router(test_state(PathBuf::from("/nonexistent/servers")));

        let (status, body) = get_response(app, "/hosts").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"message": "Internal Server Error"}));
    }

    #[tokio::test]
    async fn test_pings_missing_file_is_500() {
        let app = create_router(test_state(PathBuf::from("/nonexistent/servers")));

        let (status, body) = get_response(app, "/pings").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"message": "Internal Server Error"}));
    }
}
