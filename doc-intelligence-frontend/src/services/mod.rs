pub mod backend_client;
pub mod metrics;
pub mod view_model;

pub use backend_client::{ApiEndpoints, BackendClient, DocumentBackend, UploadAck};
