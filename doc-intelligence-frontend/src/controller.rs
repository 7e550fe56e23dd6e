//! One request/render cycle of the documents page.
//!
//! The controller owns the visitor's refresh counter for the duration of a
//! request: handlers load it from the session, hand it in, and write back
//! whatever the controller ends with.

use crate::error::TransportError;
use crate::models::{Listing, Notice};
use crate::services::backend_client::{check_upload, DocumentBackend};
use crate::services::view_model;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully!";

/// Everything the page template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub notice: Option<Notice>,
    pub listing: Listing,
    pub refresh_count: u64,
}

pub struct PageController<'a> {
    backend: &'a dyn DocumentBackend,
    refresh_count: u64,
}

impl<'a> PageController<'a> {
    pub fn new(backend: &'a dyn DocumentBackend, refresh_count: u64) -> Self {
        Self {
            backend,
            refresh_count,
        }
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Explicit refresh: bump the counter; the next render fetches afresh.
    pub fn refresh(&mut self) {
        self.refresh_count = self.refresh_count.saturating_add(1);
    }

    /// Validate and relay an upload. Success bumps the refresh counter.
    /// Every outcome becomes a notice; nothing here is fatal.
    pub async fn upload(&mut self, filename: &str, file: Vec<u8>) -> Notice {
        match self.try_upload(filename, file).await {
            Ok(()) => {
                self.refresh();
                Notice::Success(UPLOAD_SUCCESS_MESSAGE.to_string())
            }
            Err(err) => {
                tracing::warn!(
                    file_name = %filename,
                    kind = err.kind(),
                    error = %err,
                    "Upload not accepted"
                );
                Notice::Error(err.to_string())
            }
        }
    }

    /// An upload whose request body was cut off by the server's body limit.
    /// `size` is the best known measure of the file, the declared request
    /// length when there is one.
    pub fn oversize_request(&self, size: u64) -> Notice {
        let err = TransportError::FileTooLarge {
            size,
            limit: self.backend.max_upload_bytes(),
        };
        tracing::warn!(size = size, kind = err.kind(), error = %err, "Upload body over request limit");
        Notice::Error(err.to_string())
    }

    async fn try_upload(&self, filename: &str, file: Vec<u8>) -> Result<(), TransportError> {
        check_upload(filename, file.len() as u64, self.backend.max_upload_bytes())?;
        self.backend.upload(file, filename).await?;
        Ok(())
    }

    /// Fetch the current list and derive the documents section. A failed fetch
    /// yields the error state with no rows.
    pub async fn listing(&self) -> Listing {
        match self.backend.list_documents().await {
            Ok(records) => view_model::build_listing(&records, self.backend.endpoints()),
            Err(err) => {
                tracing::error!(kind = err.kind(), error = %err, "Failed to load documents");
                Listing::FetchError {
                    message: err.to_string(),
                }
            }
        }
    }

    pub async fn render(&self, notice: Option<Notice>) -> PageView {
        PageView {
            notice,
            listing: self.listing().await,
            refresh_count: self.refresh_count,
        }
    }
}
