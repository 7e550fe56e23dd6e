use thiserror::Error;

fn mib(bytes: impl std::borrow::Borrow<u64>) -> f64 {
    *bytes.borrow() as f64 / (1024.0 * 1024.0)
}

/// Failures talking to the document backend, including the pre-flight checks
/// that stop an upload before it leaves the process.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("File too large: {:.2} MB. Maximum is {} MB.", mib(.size), mib(.limit))]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Unsupported file type: {filename}. Only PDF documents are accepted.")]
    UnsupportedFileType { filename: String },

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Error fetching documents: {0}")]
    FetchFailed(String),
}

impl TransportError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::FileTooLarge { .. } => "file_too_large",
            TransportError::UnsupportedFileType { .. } => "unsupported_file_type",
            TransportError::UploadFailed(_) => "upload_failed",
            TransportError::FetchFailed(_) => "fetch_failed",
        }
    }
}

/// A single field of a backend record that could not be interpreted.
///
/// Never fatal: the listing substitutes a fallback value and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} value {raw:?}")]
pub struct RecordFieldInvalid {
    pub field: &'static str,
    pub raw: String,
}

impl RecordFieldInvalid {
    pub fn new(field: &'static str, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }
}
