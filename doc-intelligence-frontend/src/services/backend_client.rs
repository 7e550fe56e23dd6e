//! HTTP client for the document intelligence backend.
//!
//! Two calls go over the wire (upload, list); the test-case download link is
//! only built, never fetched. No retries and no timeouts beyond reqwest's
//! defaults.

use crate::config::BackendSettings;
use crate::error::TransportError;
use crate::models::DocumentRecord;
use crate::services::metrics;
use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode};
use service_core::observability::TracedClientExt;
use std::path::Path;
use url::Url;

pub const UPLOAD_PATH: &str = "/api/benefit/doc/upload";
pub const LIST_PATH: &str = "/api/benefit/docs";
pub const TEST_CASE_DOWNLOAD_PATH: &str = "/api/benefit/testcase/download";

pub const UPLOAD_FIELD: &str = "file";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Backend routes resolved against one base URL.
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    base_url: String,
    upload: Url,
    list: Url,
    test_case_download: Url,
}

impl ApiEndpoints {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base_url = crate::config::normalize_base_url(base_url);
        let resolve = |path: &str| Url::parse(&format!("{}{}", base_url, path));

        Ok(Self {
            upload: resolve(UPLOAD_PATH)?,
            list: resolve(LIST_PATH)?,
            test_case_download: resolve(TEST_CASE_DOWNLOAD_PATH)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload
    }

    pub fn list_url(&self) -> &Url {
        &self.list
    }

    /// `{base}/api/benefit/testcase/download?fileName={name}` with the name
    /// form-encoded.
    pub fn test_case_download_link(&self, document_name: &str) -> Url {
        let mut url = self.test_case_download.clone();
        url.query_pairs_mut().append_pair("fileName", document_name);
        url
    }
}

/// Backend acknowledgement of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAck {
    pub status: u16,
    pub message: String,
}

/// The operations the page needs from the backend.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    fn endpoints(&self) -> &ApiEndpoints;

    /// Largest file `upload` will send.
    fn max_upload_bytes(&self) -> u64;

    async fn upload(&self, file: Vec<u8>, filename: &str) -> Result<UploadAck, TransportError>;

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, TransportError>;
}

/// Pre-flight checks run before any upload leaves the process: a `.pdf`
/// extension (any case) and a size within `limit`.
pub fn check_upload(filename: &str, size: u64, limit: u64) -> Result<(), TransportError> {
    let is_pdf = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if !is_pdf {
        return Err(TransportError::UnsupportedFileType {
            filename: filename.to_string(),
        });
    }

    if size > limit {
        return Err(TransportError::FileTooLarge { size, limit });
    }

    Ok(())
}

pub struct BackendClient {
    client: Client,
    endpoints: ApiEndpoints,
    pub settings: BackendSettings,
}

impl BackendClient {
    pub fn new(settings: BackendSettings) -> anyhow::Result<Self> {
        let endpoints = ApiEndpoints::new(&settings.base_url).map_err(|e| {
            tracing::error!(base_url = %settings.base_url, error = %e, "Invalid backend base URL");
            anyhow::anyhow!("Invalid backend base URL {}: {}", settings.base_url, e)
        })?;

        tracing::info!(base_url = %endpoints.base_url(), "Configured document backend");

        Ok(Self {
            client: Client::new(),
            endpoints,
            settings,
        })
    }
}

fn describe_status(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}

#[async_trait]
impl DocumentBackend for BackendClient {
    fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    fn max_upload_bytes(&self) -> u64 {
        self.settings.max_upload_bytes
    }

    async fn upload(&self, file: Vec<u8>, filename: &str) -> Result<UploadAck, TransportError> {
        let size = file.len() as u64;
        check_upload(filename, size, self.settings.max_upload_bytes)?;

        let part = multipart::Part::bytes(file)
            .file_name(filename.to_string())
            .mime_str(PDF_CONTENT_TYPE)
            .map_err(|e| TransportError::UploadFailed(e.to_string()))?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let url = self.endpoints.upload_url().as_str();
        let response = self
            .client
            .traced_post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, file_name = %filename, error = %e, "Upload request failed");
                metrics::record_backend_call("upload", "error");
                TransportError::UploadFailed(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|e| {
            tracing::warn!(
                file_name = %filename,
                status = %status,
                error = %e,
                "Failed to read upload response body"
            );
            String::new()
        });

        if !status.is_success() {
            tracing::warn!(
                file_name = %filename,
                status = %status,
                "Backend rejected upload"
            );
            metrics::record_backend_call("upload", "rejected");
            return Err(TransportError::UploadFailed(describe_status(status, &body)));
        }

        tracing::info!(file_name = %filename, size = size, "File uploaded to backend");
        metrics::record_backend_call("upload", "ok");

        Ok(UploadAck {
            status: status.as_u16(),
            message: body,
        })
    }

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, TransportError> {
        let url = self.endpoints.list_url().as_str();
        let response = self.client.traced_get(url).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "List documents request failed");
            metrics::record_backend_call("list", "error");
            TransportError::FetchFailed(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Backend failed to list documents");
            metrics::record_backend_call("list", "rejected");
            return Err(TransportError::FetchFailed(describe_status(status, &body)));
        }

        let documents = response
            .json::<Vec<DocumentRecord>>()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Document list was not a JSON array of documents");
                metrics::record_backend_call("list", "invalid");
                TransportError::FetchFailed(e.to_string())
            })?;

        tracing::debug!(count = documents.len(), "Fetched document list");
        metrics::record_backend_call("list", "ok");

        Ok(documents)
    }
}
