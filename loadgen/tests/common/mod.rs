//! Common Test Utilities for Integration Tests
//!
//! A recording HTTP server that stands in for the migration service.

#![allow(dead_code)]

use axum::http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE};
use axum::{Router, body::Bytes, extract::State};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const EXPECTED_BODY: &str = r#"{"input":"CSV","output":"CSV","csv_source_file_name":"sample.csv","csv_destination_file_name":"destination_file.csv"}"#;

/// One request as seen by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct RecorderState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
}

/// Handle to a running recording server
pub struct RecordingServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RecordingServer {
    /// Start a server answering every request with `status`
    pub async fn start(status: StatusCode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = RecorderState {
            requests: requests.clone(),
            status,
        };

        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<RecorderState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    state.status
}

/// Base URL of a port nothing is listening on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Assert `request` is exactly the migration call
pub fn assert_migration_request(request: &RecordedRequest) {
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/api/migration");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.body, EXPECTED_BODY);
}
