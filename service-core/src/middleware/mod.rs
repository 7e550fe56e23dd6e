pub mod security_headers;
pub mod tracing;

pub use security_headers::security_headers_middleware;
pub use tracing::{CURRENT_REQUEST_ID, REQUEST_ID_HEADER, current_request_id, request_id_middleware};
