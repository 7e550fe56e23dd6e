#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use doc_intelligence_frontend::error::TransportError;
use doc_intelligence_frontend::models::DocumentRecord;
use doc_intelligence_frontend::services::backend_client::{ApiEndpoints, DocumentBackend, UploadAck};
use doc_intelligence_frontend::startup::build_router;
use doc_intelligence_frontend::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const BOUNDARY: &str = "----doc-intelligence-test-boundary";

/// In-memory backend that records what the page asked of it.
pub struct FakeBackend {
    endpoints: ApiEndpoints,
    documents: Mutex<Result<Vec<DocumentRecord>, String>>,
    upload_failure: Mutex<Option<String>>,
    pub uploads: Mutex<Vec<(String, usize)>>,
}

impl FakeBackend {
    pub fn with_documents(documents: Value) -> Arc<Self> {
        let documents: Vec<DocumentRecord> =
            serde_json::from_value(documents).expect("test documents must deserialize");
        Arc::new(Self {
            endpoints: ApiEndpoints::new("http://backend.test").unwrap(),
            documents: Mutex::new(Ok(documents)),
            upload_failure: Mutex::new(None),
            uploads: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::with_documents(json!([]))
    }

    pub fn unreachable(cause: &str) -> Arc<Self> {
        let backend = Self::empty();
        *backend.documents.lock().unwrap() = Err(cause.to_string());
        backend
    }

    pub fn fail_uploads(&self, cause: &str) {
        *self.upload_failure.lock().unwrap() = Some(cause.to_string());
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentBackend for FakeBackend {
    fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    fn max_upload_bytes(&self) -> u64 {
        2 * 1024 * 1024
    }

    async fn upload(&self, file: Vec<u8>, filename: &str) -> Result<UploadAck, TransportError> {
        if let Some(cause) = self.upload_failure.lock().unwrap().clone() {
            return Err(TransportError::UploadFailed(cause));
        }
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), file.len()));
        Ok(UploadAck {
            status: 200,
            message: "File uploaded".to_string(),
        })
    }

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, TransportError> {
        self.documents
            .lock()
            .unwrap()
            .clone()
            .map_err(TransportError::FetchFailed)
    }
}

pub fn app(backend: Arc<FakeBackend>) -> Router {
    build_router(AppState::new(backend, 10 * 1024 * 1024))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A browser-style multipart form with a single `file` part.
pub fn upload_request(file_name: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
